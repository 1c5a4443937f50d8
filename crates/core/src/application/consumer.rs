// Consumer - drains exactly one queue

use super::report::{StopReason, UnitReport};
use super::worker::{idle, random_pause, ShutdownToken};
use crate::domain::{BoundedQueue, Item, QueueId};
use crate::error::{AppError, Result};
use crate::port::Task;
use async_trait::async_trait;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, trace};

/// One consumer per queue; the consumer id is the queue id
pub struct Consumer {
    label: String,
    queue: Arc<BoundedQueue>,
    rng: StdRng,
    max_idle: Duration,
}

impl Consumer {
    pub fn new(queue: Arc<BoundedQueue>, rng: StdRng, max_idle: Duration) -> Self {
        Self {
            label: format!("consumer-{}", queue.id()),
            queue,
            rng,
            max_idle,
        }
    }

    pub fn id(&self) -> QueueId {
        self.queue.id()
    }

    /// One consumption cycle
    ///
    /// Holds the queue's consumer lock for the whole cycle: idle, then take
    /// the front item if any. The take is a single atomic poll, so there is
    /// no window between seeing an item and removing it. Returns `Ok(None)`
    /// when the queue was empty.
    pub async fn consume_one(&mut self, shutdown: &mut ShutdownToken) -> Result<Option<Item>> {
        let _guard = tokio::select! {
            guard = self.queue.lock_consumer() => guard,
            _ = shutdown.wait() => return Err(AppError::Cancelled),
        };

        let pause = random_pause(&mut self.rng, self.max_idle);
        idle(pause, shutdown).await?;

        match self.queue.try_remove() {
            Some(item) => {
                info!(
                    actor = %self.label,
                    queue = self.queue.id(),
                    item = %item,
                    "Removed {} from queue {}",
                    item,
                    self.queue.id()
                );
                Ok(Some(item))
            }
            None => {
                trace!(actor = %self.label, "Queue empty, nothing consumed");
                Ok(None)
            }
        }
    }

    /// Cycle until something stops the consumer; returns what stopped it
    async fn consume_loop(
        &mut self,
        shutdown: &mut ShutdownToken,
        consumed: &mut u64,
    ) -> AppError {
        loop {
            if shutdown.is_shutdown() {
                return AppError::Cancelled;
            }
            match self.consume_one(shutdown).await {
                Ok(Some(_)) => *consumed += 1,
                Ok(None) => {}
                Err(e) => return e,
            }
        }
    }
}

#[async_trait]
impl Task for Consumer {
    type Output = UnitReport;

    fn label(&self) -> &str {
        &self.label
    }

    async fn run(mut self, mut shutdown: ShutdownToken) -> UnitReport {
        info!(
            actor = %self.label,
            capacity = self.queue.capacity(),
            "Consumer started"
        );

        let mut consumed = 0;
        let stop = match self.consume_loop(&mut shutdown, &mut consumed).await {
            AppError::Cancelled => {
                info!(actor = %self.label, "Consumer was interrupted");
                StopReason::Cancelled
            }
            e => {
                error!(actor = %self.label, error = %e, "Consumer failed");
                StopReason::Failed(e.to_string())
            }
        };

        info!(actor = %self.label, consumed, stop = %stop, "Consumer stopped");
        UnitReport::new(self.label, consumed, stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::worker::shutdown_channel;
    use rand::SeedableRng;

    fn queue_with(values: &[&str]) -> Arc<BoundedQueue> {
        let queue = Arc::new(BoundedQueue::new(2, 8).unwrap());
        for value in values {
            queue.try_insert(Item::from(*value)).unwrap();
        }
        queue
    }

    #[tokio::test]
    async fn test_consume_one_takes_front_item() {
        let queue = queue_with(&["7", "42"]);
        let (_tx, mut token) = shutdown_channel();
        let mut consumer = Consumer::new(queue.clone(), StdRng::seed_from_u64(5), Duration::ZERO);

        assert_eq!(consumer.id(), 2);
        assert_eq!(consumer.label(), "consumer-2");
        assert_eq!(consumer.consume_one(&mut token).await.unwrap(), Some(Item::from("7")));
        assert_eq!(consumer.consume_one(&mut token).await.unwrap(), Some(Item::from("42")));
        assert_eq!(consumer.consume_one(&mut token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_consumer_waits_for_foreign_lock_holder() {
        let queue = queue_with(&["1"]);
        let (_tx, mut token) = shutdown_channel();
        let mut consumer = Consumer::new(queue.clone(), StdRng::seed_from_u64(5), Duration::ZERO);

        let guard = queue.lock_consumer().await;
        let mut cycle = tokio_test::task::spawn(consumer.consume_one(&mut token));
        tokio_test::assert_pending!(cycle.poll());
        assert_eq!(queue.len(), 1);

        drop(guard);
        assert!(cycle.is_woken());
        let taken = tokio_test::assert_ready!(cycle.poll()).unwrap();
        assert_eq!(taken, Some(Item::from("1")));
    }

    #[tokio::test]
    async fn test_run_drains_then_stops_on_shutdown() {
        let queue = queue_with(&["1", "2", "3"]);
        let (tx, token) = shutdown_channel();
        let consumer = Consumer::new(
            queue.clone(),
            StdRng::seed_from_u64(5),
            Duration::from_millis(2),
        );
        let handle = tokio::spawn(consumer.run(token));

        while !queue.is_empty() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        tx.shutdown();

        let report = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("consumer should stop promptly")
            .unwrap();
        assert_eq!(report.stop, StopReason::Cancelled);
        assert_eq!(report.processed, 3);
    }
}
