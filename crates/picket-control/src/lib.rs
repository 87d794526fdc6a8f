mod client;
pub use client::ControlClient;

mod config;
pub use config::ControlConfig;

mod errors;
pub use errors::ControlError;
