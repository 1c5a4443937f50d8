// Pipeline configuration

use crate::application::worker::constants::*;
use crate::error::{AppError, Result};
use serde::Deserialize;
use std::time::Duration;

/// Pipeline configuration
///
/// Every field has a default, so an empty source yields the stock
/// three-queue pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Number of queues, and therefore consumers
    pub queue_count: usize,
    /// Queue capacities are drawn uniformly from `[1, max_capacity]`
    pub max_capacity: usize,
    /// Exclusive upper bound of the producer's idle pause
    pub producer_max_idle_ms: u64,
    /// Exclusive upper bound of each consumer's idle pause
    pub consumer_max_idle_ms: u64,
    /// Stop producing after this many items (unbounded when unset)
    pub produce_limit: Option<u64>,
    /// Base seed for reproducible per-unit random streams
    pub seed: Option<u64>,
    /// Run the one-shot diagnostic task at startup
    pub run_diagnostic: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            queue_count: DEFAULT_QUEUE_COUNT,
            max_capacity: DEFAULT_MAX_QUEUE_CAPACITY,
            producer_max_idle_ms: DEFAULT_MAX_IDLE.as_millis() as u64,
            consumer_max_idle_ms: DEFAULT_MAX_IDLE.as_millis() as u64,
            produce_limit: None,
            seed: None,
            run_diagnostic: true,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.queue_count == 0 {
            return Err(AppError::Config("queue_count must be at least 1".into()));
        }
        if self.max_capacity < MIN_QUEUE_CAPACITY {
            return Err(AppError::Config(format!(
                "max_capacity must be at least {}",
                MIN_QUEUE_CAPACITY
            )));
        }
        Ok(())
    }

    pub fn producer_max_idle(&self) -> Duration {
        Duration::from_millis(self.producer_max_idle_ms)
    }

    pub fn consumer_max_idle(&self) -> Duration {
        Duration::from_millis(self.consumer_max_idle_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_pipeline() {
        let config = PipelineConfig::default();
        assert_eq!(config.queue_count, 3);
        assert_eq!(config.max_capacity, 30);
        assert_eq!(config.producer_max_idle(), Duration::from_secs(1));
        assert!(config.produce_limit.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_queues() {
        let config = PipelineConfig {
            queue_count: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("queue_count"));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = PipelineConfig {
            max_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
