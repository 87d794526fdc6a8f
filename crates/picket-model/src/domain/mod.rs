mod task_id;
pub use task_id::TaskId;

mod task;
pub use task::Task;

mod execution;
pub use execution::Execution;

mod report;
pub use report::Report;
