// Unit and pipeline run reports

use crate::domain::QueueId;
use std::fmt;

/// Why a unit stopped running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown was observed at a blocking or idling point
    Cancelled,
    /// The configured production limit was reached
    LimitReached,
    /// The unit ended abnormally (panic, abort or unexpected error)
    Failed(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Cancelled => f.write_str("cancelled"),
            StopReason::LimitReached => f.write_str("limit reached"),
            StopReason::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// What a long-running unit did before it stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitReport {
    pub label: String,
    /// Items produced (producer) or consumed (consumer)
    pub processed: u64,
    pub stop: StopReason,
}

impl UnitReport {
    pub fn new(label: impl Into<String>, processed: u64, stop: StopReason) -> Self {
        Self {
            label: label.into(),
            processed,
            stop,
        }
    }
}

/// Summary of a whole pipeline run, assembled at shutdown
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub producer: UnitReport,
    pub consumers: Vec<UnitReport>,
    /// Items still buffered per queue when the pipeline stopped
    pub leftover: Vec<(QueueId, usize)>,
}

impl PipelineReport {
    pub fn produced(&self) -> u64 {
        self.producer.processed
    }

    pub fn consumed(&self) -> u64 {
        self.consumers.iter().map(|c| c.processed).sum()
    }

    pub fn buffered(&self) -> usize {
        self.leftover.iter().map(|(_, len)| len).sum()
    }
}
