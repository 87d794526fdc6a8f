use thiserror::Error;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("task body too short: {0} bytes")]
    Truncated(usize),
    #[error("task id is not valid utf-8")]
    BadTaskId,
    #[error("payload is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
