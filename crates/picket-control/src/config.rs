/// Controller connection settings, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Endpoint every exchange is POSTed to.
    pub endpoint: String,
    /// Authentication token sent as the `token` request header.
    pub token: String,
}
