use serde::{Deserialize, Serialize};

/// Outcome of one probe invocation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    /// Return value of the probe's entry point.
    pub exit_code: i32,
    /// Process-wide CPU seconds consumed while the probe ran.
    pub cpu_seconds: f64,
}
