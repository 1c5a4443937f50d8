// Port Layer - Interfaces the application layer is written against

pub mod rng_provider; // For deterministic testing
pub mod task;

// Re-exports
pub use rng_provider::{EntropyRngProvider, RngProvider, SeededRngProvider};
pub use task::Task;
