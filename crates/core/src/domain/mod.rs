// Domain Layer - Items, bounded queues and the queue group

pub mod error;
pub mod group;
pub mod item;
pub mod queue;

// Re-exports
pub use error::DomainError;
pub use group::QueueGroup;
pub use item::Item;
pub use queue::{BoundedQueue, ConsumerGuard, QueueId};
