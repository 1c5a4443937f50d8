// Application Layer - Selection policy, pipeline units and their coordination

pub mod consumer;
pub mod coordinator;
pub mod diagnostic;
pub mod producer;
pub mod report;
pub mod selection;
pub mod worker;

// Re-exports
pub use consumer::Consumer;
pub use coordinator::{Coordinator, RunningPipeline};
pub use diagnostic::DiagnosticTask;
pub use producer::Producer;
pub use report::{PipelineReport, StopReason, UnitReport};
pub use selection::{select_shortest, shortest_tie_set};
pub use worker::{shutdown_channel, ShutdownSender, ShutdownToken, WorkerPool};
