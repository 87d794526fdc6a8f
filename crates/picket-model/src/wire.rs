//! Controller response body layout.
//!
//! A task arrives as one opaque body: the first 36 bytes are the task id,
//! everything after is the probe payload as ASCII hex. There is no framing
//! beyond that and no streaming; the body is parsed in one pass or the task
//! is discarded.

use crate::domain::{Task, TaskId};
use crate::error::WireError;

/// Length of the id prefix in a task body.
pub const TASK_ID_LEN: usize = 36;

/// Parse a controller response body into a [`Task`].
///
/// An empty payload (body of exactly [`TASK_ID_LEN`] bytes) is valid; the
/// hex remainder must otherwise decode cleanly or the whole task is rejected.
pub fn parse_task(body: &[u8]) -> Result<Task, WireError> {
    if body.len() < TASK_ID_LEN {
        return Err(WireError::Truncated(body.len()));
    }
    let (id, payload) = body.split_at(TASK_ID_LEN);
    let id = std::str::from_utf8(id).map_err(|_| WireError::BadTaskId)?;
    let payload = decode_hex(payload)?;

    Ok(Task {
        id: TaskId::from(id),
        payload,
    })
}

/// Strict hex decoding: two digits per byte, either case, nothing else.
///
/// Odd-length input and any non-hex character fail the whole buffer; there
/// is no partial result to observe.
pub fn decode_hex(payload: &[u8]) -> Result<Vec<u8>, WireError> {
    Ok(hex::decode(payload)?)
}
