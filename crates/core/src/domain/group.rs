// Queue Group Domain Model

use super::error::{DomainError, Result};
use super::queue::{BoundedQueue, QueueId};
use std::collections::HashSet;
use std::sync::Arc;

/// Fixed, ordered registry of queues (no queues added or removed after construction)
#[derive(Debug, Clone)]
pub struct QueueGroup {
    queues: Vec<Arc<BoundedQueue>>,
}

impl QueueGroup {
    /// Build a group, rejecting an empty list or repeated identifiers
    pub fn new(queues: Vec<BoundedQueue>) -> Result<Self> {
        if queues.is_empty() {
            return Err(DomainError::EmptyGroup);
        }

        let mut seen = HashSet::with_capacity(queues.len());
        for queue in &queues {
            if !seen.insert(queue.id()) {
                return Err(DomainError::DuplicateQueueId(queue.id()));
            }
        }

        Ok(Self {
            queues: queues.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    /// Always false for a constructed group; provided for API symmetry
    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<BoundedQueue>> {
        self.queues.iter()
    }

    pub fn queues(&self) -> &[Arc<BoundedQueue>] {
        &self.queues
    }

    pub fn get(&self, id: QueueId) -> Option<&Arc<BoundedQueue>> {
        self.queues.iter().find(|queue| queue.id() == id)
    }

    /// Total items currently buffered across all queues (advisory)
    pub fn total_len(&self) -> usize {
        self.queues.iter().map(|queue| queue.len()).sum()
    }
}
