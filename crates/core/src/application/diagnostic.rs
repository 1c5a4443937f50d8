// Diagnostic Task - one-shot unit of work that returns a value

use crate::application::worker::ShutdownToken;
use crate::error::Result;
use crate::port::Task;
use async_trait::async_trait;
use tracing::info;

type Check = Box<dyn FnOnce() -> Result<String> + Send>;

/// Ad-hoc unit run alongside the pipeline
///
/// Unlike the producer and consumers it does not loop: it runs its check
/// once and hands the outcome back through its join handle.
pub struct DiagnosticTask {
    label: String,
    check: Check,
}

impl DiagnosticTask {
    pub fn new<F>(label: impl Into<String>, check: F) -> Self
    where
        F: FnOnce() -> Result<String> + Send + 'static,
    {
        Self {
            label: label.into(),
            check: Box::new(check),
        }
    }
}

#[async_trait]
impl Task for DiagnosticTask {
    type Output = Result<String>;

    fn label(&self) -> &str {
        &self.label
    }

    async fn run(self, _shutdown: ShutdownToken) -> Result<String> {
        info!(actor = %self.label, "Diagnostic task running");
        (self.check)()
    }
}
