// Producer - routes each generated item to the shortest queue

use super::report::{StopReason, UnitReport};
use super::selection::select_shortest;
use super::worker::{idle, random_pause, ShutdownToken};
use crate::domain::{Item, QueueGroup, QueueId};
use crate::error::{AppError, Result};
use crate::port::Task;
use async_trait::async_trait;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Actor label of the single producer
pub const PRODUCER_LABEL: &str = "producer";

/// Single producer shared by every queue in the group
///
/// Per cycle: pick the shortest queue (random among ties), insert a fresh
/// item (waiting while that queue is full), log it, then idle for a random
/// pause below `max_idle`.
pub struct Producer {
    label: String,
    group: Arc<QueueGroup>,
    rng: StdRng,
    max_idle: Duration,
    limit: Option<u64>,
}

impl Producer {
    pub fn new(group: Arc<QueueGroup>, rng: StdRng, max_idle: Duration) -> Self {
        Self {
            label: PRODUCER_LABEL.to_string(),
            group,
            rng,
            max_idle,
            limit: None,
        }
    }

    /// Stop gracefully after `limit` items (unbounded by default)
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    /// One production step: select, generate, insert
    ///
    /// Returns the queue id and item on success, or `AppError::Cancelled` if
    /// shutdown arrived while waiting for space.
    pub async fn produce_one(&mut self, shutdown: &mut ShutdownToken) -> Result<(QueueId, Item)> {
        let queue = select_shortest(&self.group, &mut self.rng)
            .cloned()
            .ok_or_else(|| AppError::TaskFailed("queue group has no queues".into()))?;
        let item = Item::random(&mut self.rng);

        tokio::select! {
            _ = queue.insert(item.clone()) => {}
            _ = shutdown.wait() => return Err(AppError::Cancelled),
        }

        info!(
            actor = %self.label,
            queue = queue.id(),
            item = %item,
            "Adding {} to queue {}",
            item,
            queue.id()
        );
        Ok((queue.id(), item))
    }

    fn limit_reached(&self, produced: u64) -> bool {
        self.limit.is_some_and(|limit| produced >= limit)
    }

    async fn produce_loop(
        &mut self,
        shutdown: &mut ShutdownToken,
        produced: &mut u64,
    ) -> Result<StopReason> {
        loop {
            if self.limit_reached(*produced) {
                return Ok(StopReason::LimitReached);
            }
            if shutdown.is_shutdown() {
                return Err(AppError::Cancelled);
            }

            self.produce_one(shutdown).await?;
            *produced += 1;

            if self.limit_reached(*produced) {
                return Ok(StopReason::LimitReached);
            }

            let pause = random_pause(&mut self.rng, self.max_idle);
            idle(pause, shutdown).await?;
        }
    }
}

#[async_trait]
impl Task for Producer {
    type Output = UnitReport;

    fn label(&self) -> &str {
        &self.label
    }

    async fn run(mut self, mut shutdown: ShutdownToken) -> UnitReport {
        info!(
            actor = %self.label,
            queues = self.group.len(),
            limit = ?self.limit,
            "Producer started"
        );

        let mut produced = 0;
        let stop = match self.produce_loop(&mut shutdown, &mut produced).await {
            Ok(reason) => reason,
            Err(AppError::Cancelled) => {
                info!(actor = %self.label, "Producer was interrupted");
                StopReason::Cancelled
            }
            Err(e) => {
                error!(actor = %self.label, error = %e, "Producer failed");
                StopReason::Failed(e.to_string())
            }
        };

        info!(actor = %self.label, produced, stop = %stop, "Producer stopped");
        UnitReport::new(self.label, produced, stop)
    }
}
