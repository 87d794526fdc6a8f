use crate::domain::TaskId;

/// One unit of work issued by the controller: an id to report against and
/// the decoded probe payload to run.
///
/// A task is owned by exactly one cycle; nothing about it survives into the
/// next iteration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub payload: Vec<u8>,
}
