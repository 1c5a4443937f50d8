// Bounded Queue Domain Model
//
// Fixed-capacity FIFO shared between the producer (writer) and one consumer
// (remover). Blocking operations park on tokio `Notify` instead of a thread.

use super::error::{DomainError, Result};
use super::item::Item;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tracing::trace;

/// Queue identifier (unique within a QueueGroup, doubles as the consumer id)
pub type QueueId = u32;

/// Exclusive hold on a queue's consumer side, released on drop
pub type ConsumerGuard<'a> = tokio::sync::MutexGuard<'a, ()>;

/// Fixed-capacity FIFO with blocking insert and blocking-or-poll removal
///
/// Invariant: `len() <= capacity()` at all times. `insert` waits while the
/// queue is full; `remove` waits while it is empty; `try_remove` never waits.
#[derive(Debug)]
pub struct BoundedQueue {
    id: QueueId,
    capacity: usize,
    items: Mutex<VecDeque<Item>>,
    not_full: Notify,
    not_empty: Notify,
    consumer_lock: tokio::sync::Mutex<()>,
    peak_len: AtomicUsize,
}

impl BoundedQueue {
    /// Create an empty queue
    ///
    /// A zero capacity is rejected: such a queue would be permanently full and
    /// permanently empty at once, so every insert into it would hang.
    pub fn new(id: QueueId, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(DomainError::InvalidCapacity { id, capacity });
        }

        Ok(Self {
            id,
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            not_full: Notify::new(),
            not_empty: Notify::new(),
            consumer_lock: tokio::sync::Mutex::new(()),
            peak_len: AtomicUsize::new(0),
        })
    }

    pub fn id(&self) -> QueueId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current length (advisory: may be stale by the time it is used)
    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.lock_items().len() >= self.capacity
    }

    /// Highest length ever observed right after an insert
    pub fn peak_len(&self) -> usize {
        self.peak_len.load(Ordering::Acquire)
    }

    /// Append an item, waiting while the queue is full
    ///
    /// Cancel-safe: if the returned future is dropped before completing, the
    /// item was not inserted.
    pub async fn insert(&self, item: Item) {
        loop {
            // Register interest before checking so a concurrent remove between
            // the check and the await cannot be missed
            let notified = self.not_full.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut items = self.lock_items();
                if items.len() < self.capacity {
                    items.push_back(item);
                    self.record_len(items.len());
                    drop(items);
                    self.not_empty.notify_one();
                    return;
                }
            }

            trace!(queue = self.id, "Queue full, waiting for space");
            notified.await;
        }
    }

    /// Append an item without waiting; hands the item back when full
    pub fn try_insert(&self, item: Item) -> std::result::Result<(), Item> {
        let mut items = self.lock_items();
        if items.len() >= self.capacity {
            return Err(item);
        }
        items.push_back(item);
        self.record_len(items.len());
        drop(items);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Take the front item, waiting while the queue is empty
    ///
    /// Cancel-safe: if the returned future is dropped before completing, no
    /// item was removed.
    pub async fn remove(&self) -> Item {
        loop {
            let notified = self.not_empty.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(item) = self.try_remove() {
                return item;
            }

            trace!(queue = self.id, "Queue empty, waiting for an item");
            notified.await;
        }
    }

    /// Take the front item if there is one, in a single atomic step
    pub fn try_remove(&self) -> Option<Item> {
        let item = self.lock_items().pop_front()?;
        self.not_full.notify_one();
        Some(item)
    }

    /// Acquire the consumer-side exclusive lock
    ///
    /// Only consumers take this lock; it makes a consumer's whole cycle
    /// exclusive should more than one consumer ever share a queue.
    pub async fn lock_consumer(&self) -> ConsumerGuard<'_> {
        self.consumer_lock.lock().await
    }

    fn record_len(&self, len: usize) {
        self.peak_len.fetch_max(len, Ordering::AcqRel);
    }

    fn lock_items(&self) -> MutexGuard<'_, VecDeque<Item>> {
        // Critical sections never panic mid-update, so a poisoned lock still
        // guards a consistent deque
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "queue_test.rs"]
mod queue_test;
