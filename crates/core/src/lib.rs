// Queue Balancer Core - Bounded queues, producer, consumers, coordinator
// NO process concerns here (signals, subscriber setup, env loading live in the daemon)

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use config::PipelineConfig;
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
