//! Application-level configuration loading: bind port, file locations and spin timings.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::wheel::SpinTiming;

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SPIN_WHEEL_CONFIG_PATH";
/// Environment variables checked, in order, for the bind port.
const PORT_ENVS: [&str; 2] = ["PORT", "SERVER_PORT"];
/// Environment variable pointing the console client at a relay.
const RELAY_URL_ENV: &str = "SPIN_WHEEL_RELAY_URL";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_LOG_FILE: &str = "spin_log.txt";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    port: u16,
    log_file: PathBuf,
    static_dir: PathBuf,
    relay_url: String,
    timing: SpinTiming,
}

impl AppConfig {
    /// Load the configuration from disk and environment, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!(path = %path.display(), "loaded configuration file");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        if let Some(port) = PORT_ENVS
            .iter()
            .find_map(|name| parse_port(env::var(name).ok()))
        {
            config.port = port;
        }
        if let Some(url) = env::var(RELAY_URL_ENV).ok().filter(|url| !url.trim().is_empty()) {
            config.relay_url = url;
        }

        config
    }

    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json(contents: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<RawConfig>(contents).map(Into::into)
    }

    /// TCP port the relay listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Path of the append-only spin log.
    pub fn log_file(&self) -> &PathBuf {
        &self.log_file
    }

    /// Directory holding `index.html`, `control.html` and other assets.
    pub fn static_dir(&self) -> &PathBuf {
        &self.static_dir
    }

    /// Base URL the console client talks to.
    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }

    /// Spin animation timings.
    pub fn timing(&self) -> SpinTiming {
        self.timing
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            relay_url: format!("http://localhost:{DEFAULT_PORT}"),
            timing: SpinTiming::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    log_file: Option<PathBuf>,
    #[serde(default)]
    static_dir: Option<PathBuf>,
    #[serde(default)]
    relay_url: Option<String>,
    #[serde(default)]
    timing: RawTiming,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        Self {
            port: value.port.unwrap_or(defaults.port),
            log_file: value.log_file.unwrap_or(defaults.log_file),
            static_dir: value.static_dir.unwrap_or(defaults.static_dir),
            relay_url: value.relay_url.unwrap_or(defaults.relay_url),
            timing: value.timing.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Timing overrides, all expressed in milliseconds or whole turns.
struct RawTiming {
    idle_period_ms: Option<u64>,
    accelerate_ms: Option<u64>,
    decelerate_ms: Option<u64>,
    settle_ms: Option<u64>,
    rig_banner_ms: Option<u64>,
    history_poll_ms: Option<u64>,
    acceleration_turns: Option<u32>,
    extra_turns: Option<u32>,
}

impl From<RawTiming> for SpinTiming {
    fn from(value: RawTiming) -> Self {
        let defaults = SpinTiming::default();
        let ms = |raw: Option<u64>, fallback: Duration| raw.map(Duration::from_millis).unwrap_or(fallback);

        let mut history_poll = ms(value.history_poll_ms, defaults.history_poll);
        if history_poll.is_zero() {
            warn!("history poll interval must be positive; using default");
            history_poll = defaults.history_poll;
        }

        Self {
            idle_period: ms(value.idle_period_ms, defaults.idle_period),
            accelerate: ms(value.accelerate_ms, defaults.accelerate),
            decelerate: ms(value.decelerate_ms, defaults.decelerate),
            settle: ms(value.settle_ms, defaults.settle),
            rig_banner: ms(value.rig_banner_ms, defaults.rig_banner),
            history_poll,
            acceleration_turns: value.acceleration_turns.unwrap_or(defaults.acceleration_turns),
            extra_turns: value.extra_turns.unwrap_or(defaults.extra_turns),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn parse_port(value: Option<String>) -> Option<u16> {
    value.and_then(|raw| raw.trim().parse::<u16>().ok())
}
