/// Consume-once rig slot.
pub mod rig;

use std::sync::Arc;

use crate::{config::AppConfig, dao::spin_log::SpinLogStore};

pub use self::rig::RigSlot;

/// Shared handle passed to every route.
pub type SharedState = Arc<AppState>;

/// Central application state: the rig slot and the spin log backend.
pub struct AppState {
    rig: RigSlot,
    spin_log: Arc<dyn SpinLogStore>,
    config: AppConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig, spin_log: Arc<dyn SpinLogStore>) -> SharedState {
        Arc::new(Self {
            rig: RigSlot::new(),
            spin_log,
            config,
        })
    }

    /// Operator-controlled slot holding the next forced outcome.
    pub fn rig(&self) -> &RigSlot {
        &self.rig
    }

    /// Handle to the spin log backend.
    pub fn spin_log(&self) -> Arc<dyn SpinLogStore> {
        self.spin_log.clone()
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::{io, path::PathBuf, sync::Arc};

    use futures::future::BoxFuture;
    use uuid::Uuid;

    use super::{AppState, SharedState};
    use crate::{
        config::AppConfig,
        dao::{
            spin_log::{FileSpinLog, SpinLogStore},
            storage::{StorageError, StorageResult},
        },
        wheel::Outcome,
    };

    /// State backed by a fresh log file in the temp directory.
    pub async fn temp_state() -> (SharedState, PathBuf) {
        let path = std::env::temp_dir().join(format!("spin-wheel-{}.txt", Uuid::new_v4()));
        let log = FileSpinLog::open(&path).await.unwrap();
        (AppState::new(AppConfig::default(), Arc::new(log)), path)
    }

    /// State whose spin log rejects every operation.
    pub fn failing_state() -> SharedState {
        AppState::new(AppConfig::default(), Arc::new(FailingSpinLog))
    }

    struct FailingSpinLog;

    fn broken() -> StorageError {
        StorageError::unavailable("disk gone", io::Error::other("disk gone"))
    }

    impl SpinLogStore for FailingSpinLog {
        fn append(&self, _outcome: Outcome) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(broken()) })
        }

        fn read_lines(&self) -> BoxFuture<'static, StorageResult<Vec<String>>> {
            Box::pin(async { Err(broken()) })
        }

        fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
            Box::pin(async { Err(broken()) })
        }
    }
}
