use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::future::BoxFuture;
use tokio::{fs::OpenOptions, io::AsyncWriteExt, sync::Mutex};
use tracing::debug;

use crate::{
    dao::storage::{StorageError, StorageResult},
    wheel::Outcome,
};

/// Abstraction over where spin outcomes are recorded.
pub trait SpinLogStore: Send + Sync {
    /// Append one outcome label as a new line.
    fn append(&self, outcome: Outcome) -> BoxFuture<'static, StorageResult<()>>;
    /// Read every raw line currently stored, oldest first.
    fn read_lines(&self) -> BoxFuture<'static, StorageResult<Vec<String>>>;
    /// Check that the backing storage is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}

/// Flat text file holding one label per line, never rewritten.
#[derive(Clone)]
pub struct FileSpinLog {
    path: Arc<PathBuf>,
    write_gate: Arc<Mutex<()>>,
}

impl FileSpinLog {
    /// Open the log at `path`, creating an empty file when it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|err| {
                StorageError::unavailable(format!("failed to open {}", path.display()), err)
            })?;

        debug!(path = %path.display(), "spin log ready");
        Ok(Self {
            path: Arc::new(path),
            write_gate: Arc::new(Mutex::new(())),
        })
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpinLogStore for FileSpinLog {
    fn append(&self, outcome: Outcome) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        let gate = self.write_gate.clone();
        Box::pin(async move {
            let _guard = gate.lock().await;
            let line = format!("{}\n", outcome.label());
            let write = async {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path.as_path())
                    .await?;
                file.write_all(line.as_bytes()).await?;
                file.flush().await
            };
            write.await.map_err(|err| {
                StorageError::unavailable(format!("failed to append to {}", path.display()), err)
            })
        })
    }

    fn read_lines(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
        let path = self.path.clone();
        Box::pin(async move {
            let bytes = tokio::fs::read(path.as_path()).await.map_err(|err| {
                StorageError::unavailable(format!("failed to read {}", path.display()), err)
            })?;
            // stray bytes only spoil their own line
            Ok(String::from_utf8_lossy(&bytes)
                .lines()
                .map(str::to_owned)
                .collect())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let path = self.path.clone();
        Box::pin(async move {
            let metadata = tokio::fs::metadata(path.as_path()).await.map_err(|err| {
                StorageError::unavailable(format!("cannot stat {}", path.display()), err)
            })?;
            if !metadata.is_file() {
                return Err(StorageError::unavailable(
                    format!("{} is not a regular file", path.display()),
                    io::Error::other("not a regular file"),
                ));
            }
            Ok(())
        })
    }
}
