//! Queue Balancer - Main Entry Point
//! One producer feeding the shortest of N bounded queues, one consumer per queue

mod logging;
mod settings;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use queue_balancer_core::application::{Coordinator, WorkerPool};
use queue_balancer_core::port::{EntropyRngProvider, RngProvider, SeededRngProvider};
use queue_balancer_core::PipelineConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    // 1. Initialize logging
    logging::init()?;
    info!("Queue Balancer v{} starting...", VERSION);

    // 2. Load configuration
    let config = settings::load()?;
    info!(config = ?config, "Configuration loaded");

    // 3. Size the runtime: one thread per consumer, the producer, one ad-hoc task
    let threads = WorkerPool::threads_for(config.queue_count);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(threads)
        .thread_name("queue-balancer-worker")
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: PipelineConfig) -> Result<()> {
    // 4. Wire dependencies
    let rng_provider: Arc<dyn RngProvider> = match config.seed {
        Some(seed) => Arc::new(SeededRngProvider::new(seed)),
        None => Arc::new(EntropyRngProvider),
    };
    let run_diagnostic = config.run_diagnostic;
    let coordinator = Coordinator::new(config, rng_provider)?;

    // 5. Start producer and consumers
    let mut pipeline = coordinator.start()?;

    // 6. Optional one-shot diagnostic; waiting on it blocks only this task
    if run_diagnostic {
        let message = pipeline.run_diagnostic().await;
        info!("{}", message);
    }

    info!("Press Ctrl+C to shutdown");

    // 7. Wait for a shutdown signal or the production limit
    tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received. Exiting gracefully...");
        }
        report = pipeline.producer_finished() => {
            info!(produced = report.processed, stop = %report.stop, "Producer finished");
        }
    }

    // 8. Orderly shutdown
    let report = pipeline.shutdown().await;
    for unit in report.consumers.iter().chain(std::iter::once(&report.producer)) {
        info!(actor = %unit.label, processed = unit.processed, stop = %unit.stop, "Unit summary");
    }
    info!(leftover = ?report.leftover, "Shutdown complete.");

    Ok(())
}
