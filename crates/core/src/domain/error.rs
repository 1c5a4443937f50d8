// Domain Error Types

use super::queue::QueueId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid capacity for queue {id}: {capacity} (must be at least 1)")]
    InvalidCapacity { id: QueueId, capacity: usize },

    #[error("Queue group must contain at least one queue")]
    EmptyGroup,

    #[error("Duplicate queue id in group: {0}")]
    DuplicateQueueId(QueueId),
}

pub type Result<T> = std::result::Result<T, DomainError>;
