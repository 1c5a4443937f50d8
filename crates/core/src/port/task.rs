// Task Port - a unit of work schedulable on the worker pool

use crate::application::worker::ShutdownToken;
use async_trait::async_trait;

/// A unit of work that runs until it is cancelled or returns a value
///
/// Implementations:
/// - Producer / Consumer: loop until shutdown (or a production limit), then
///   report what they processed
/// - DiagnosticTask: one-shot, returns a result immediately
///
/// Implementations only observe `shutdown` at their blocking and idling
/// points; cancellation never preempts a unit mid-step.
#[async_trait]
pub trait Task: Send + 'static {
    /// What the unit yields when it finishes
    type Output: Send + 'static;

    /// Human-readable actor label used in log lines
    fn label(&self) -> &str;

    /// Run the unit to completion
    async fn run(self, shutdown: ShutdownToken) -> Self::Output;
}
