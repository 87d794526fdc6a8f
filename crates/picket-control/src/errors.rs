use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControlError {
    #[error("http client construction failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("auth token is not a valid header value")]
    BadToken,
}
