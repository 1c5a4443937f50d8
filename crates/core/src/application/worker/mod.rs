// Worker Pool - schedules pipeline units on the tokio runtime

pub mod constants;
mod shutdown;

use constants::*;
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::error::{AppError, Result};
use crate::port::Task;
use rand::Rng;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::debug;

/// Launches units of work and owns the shutdown signal they all share
pub struct WorkerPool {
    shutdown_tx: ShutdownSender,
    token: ShutdownToken,
}

impl WorkerPool {
    /// Create a pool (must be called from within a tokio runtime before `submit`)
    pub fn new() -> Self {
        let (shutdown_tx, token) = shutdown_channel();
        Self { shutdown_tx, token }
    }

    /// Runtime worker threads needed to give every unit its own slot
    ///
    /// One per consumer, plus the producer and one ad-hoc task.
    pub fn threads_for(queue_count: usize) -> usize {
        queue_count + EXTRA_POOL_SLOTS
    }

    /// Spawn a unit; it receives its own clone of the shutdown token
    pub fn submit<T: Task>(&self, task: T) -> JoinHandle<T::Output> {
        debug!(unit = task.label(), "Submitting unit to worker pool");
        tokio::spawn(task.run(self.token.clone()))
    }

    /// Request cooperative shutdown of every submitted unit
    pub fn shutdown(&self) {
        self.shutdown_tx.shutdown();
    }

    pub fn is_shutdown(&self) -> bool {
        self.token.is_shutdown()
    }

    pub fn token(&self) -> ShutdownToken {
        self.token.clone()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a pause uniformly from `[0, max)`; zero when `max` is zero
pub fn random_pause<R: Rng + ?Sized>(rng: &mut R, max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rng.gen_range(0..max_ms))
}

/// Sleep for `pause` unless shutdown arrives first
///
/// A zero pause does not touch the timer; it only checks for shutdown.
pub async fn idle(pause: Duration, shutdown: &mut ShutdownToken) -> Result<()> {
    if pause.is_zero() {
        if shutdown.is_shutdown() {
            return Err(AppError::Cancelled);
        }
        return Ok(());
    }
    tokio::select! {
        _ = sleep(pause) => Ok(()),
        _ = shutdown.wait() => Err(AppError::Cancelled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_threads_for_adds_producer_and_adhoc_slot() {
        assert_eq!(WorkerPool::threads_for(3), 5);
    }

    #[test]
    fn test_random_pause_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let max = Duration::from_millis(50);
        for _ in 0..200 {
            assert!(random_pause(&mut rng, max) < max);
        }
        assert_eq!(random_pause(&mut rng, Duration::ZERO), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_idle_interrupted_by_shutdown() {
        let pool = WorkerPool::new();
        let mut token = pool.token();
        pool.shutdown();

        let result = idle(Duration::from_secs(60), &mut token).await;
        assert!(matches!(result, Err(AppError::Cancelled)));
        assert!(pool.is_shutdown());
    }
}
