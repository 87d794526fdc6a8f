mod error;
pub use error::WireError;

mod domain;
pub use domain::{Execution, Report, Task, TaskId};

mod wire;
pub use wire::{TASK_ID_LEN, decode_hex, parse_task};
