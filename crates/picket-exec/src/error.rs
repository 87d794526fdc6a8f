use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("artifact creation failed: {0}")]
    Create(#[source] std::io::Error),
    #[error("artifact write failed: {0}")]
    Write(#[source] std::io::Error),
    #[error("module load failed: {0}")]
    Load(String),
    #[error("symbol `{name}` unresolved: {reason}")]
    Symbol {
        name: &'static str,
        reason: String,
    },
    #[error("resource usage unavailable: {0}")]
    Accounting(String),
}
