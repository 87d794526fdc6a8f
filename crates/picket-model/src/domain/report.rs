use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Execution, TaskId};

/// Result line sent back to the controller after a completed probe run.
///
/// Renders as `os:id:exit_code:cpu_seconds` with the CPU cost fixed to three
/// decimal digits. The rendered line is also the body of the next request,
/// so reporting and fetching the following task are a single exchange.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub os: String,
    pub task: TaskId,
    pub execution: Execution,
}

impl Report {
    pub fn new(os: impl Into<String>, task: TaskId, execution: Execution) -> Self {
        Self {
            os: os.into(),
            task,
            execution,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{:.3}",
            self.os, self.task, self.execution.exit_code, self.execution.cpu_seconds
        )
    }
}
