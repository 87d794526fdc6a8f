mod config;
pub use config::{AgentConfig, ConfigError, logger_from_env};

mod cycle;
pub use cycle::Agent;

mod system;
pub use system::platform;
