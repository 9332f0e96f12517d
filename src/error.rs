use crate::queue::QueueId;
use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned by the fallible [`Queue`](crate::Queue) and
/// [`Chain`](crate::Chain) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// Copying an element value could not allocate. The queue is unchanged.
    #[error("failed to allocate an element value")]
    Alloc(#[from] TryReserveError),
    /// The chain holds no queue with this id.
    #[error("no queue with id {0} in the chain")]
    NoSuchQueue(QueueId),
    /// A merge was requested on a chain with no queue.
    #[error("cannot merge an empty chain")]
    EmptyChain,
}
