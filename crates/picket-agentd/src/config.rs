//! Agent configuration, read from the process environment once at startup
//! and immutable afterwards.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use picket_control::ControlConfig;
use picket_observe::{LoggerConfig, LoggerError};

use crate::system::platform;

pub const ENV_TOKEN: &str = "PICKET_TOKEN";
pub const ENV_ENDPOINT: &str = "PICKET_ENDPOINT";
pub const ENV_INTERVAL: &str = "PICKET_INTERVAL_SECS";
pub const ENV_MAX_CYCLES: &str = "PICKET_MAX_CYCLES";
pub const ENV_LOG_LEVEL: &str = "PICKET_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "PICKET_LOG_FORMAT";

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/";
const DEFAULT_INTERVAL_SECS: u64 = 43_200;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("{name} is not a valid integer: {value}")]
    BadNumber { name: &'static str, value: String },
    #[error("working directory unavailable: {0}")]
    WorkDir(#[source] std::io::Error),
}

/// Everything one agent process needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Controller endpoint and auth token.
    pub control: ControlConfig,
    /// Lowercase OS identifier; first request body and report prefix.
    pub os: String,
    /// Directory probe artifacts are staged in.
    pub work_dir: PathBuf,
    /// Idle sleep between cycles.
    pub interval: Duration,
    /// Stop after this many cycles; `None` polls forever.
    pub max_cycles: Option<u64>,
}

impl AgentConfig {
    /// Build the configuration from `PICKET_*` environment variables.
    ///
    /// A missing token is the one unrecoverable omission: the agent has no
    /// anonymous mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(ENV_TOKEN).map_err(|_| ConfigError::Missing(ENV_TOKEN))?;
        let endpoint =
            std::env::var(ENV_ENDPOINT).unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let interval =
            Duration::from_secs(parse_env(ENV_INTERVAL)?.unwrap_or(DEFAULT_INTERVAL_SECS));
        let max_cycles = parse_env(ENV_MAX_CYCLES)?;
        let work_dir = std::env::current_dir().map_err(ConfigError::WorkDir)?;

        Ok(Self {
            control: ControlConfig { endpoint, token },
            os: platform().to_string(),
            work_dir,
            interval,
            max_cycles,
        })
    }
}

/// Logger settings, read separately so they can be applied before anything
/// else can fail.
pub fn logger_from_env() -> Result<LoggerConfig, LoggerError> {
    let mut cfg = LoggerConfig::default();
    if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
        cfg.level = level;
    }
    if let Ok(format) = std::env::var(ENV_LOG_FORMAT) {
        cfg.format = format.parse()?;
    }
    Ok(cfg)
}

fn parse_env(name: &'static str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(name) {
        Ok(value) => parse_u64(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_u64(name: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::BadNumber {
        name,
        value: value.to_string(),
    })
}
