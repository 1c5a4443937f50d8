//! Subscriber setup
//!
//! `RUST_LOG` controls filtering (default: info for the workspace crates);
//! `QUEUE_BALANCER_LOG_FORMAT=json` switches to structured JSON lines.

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "queue_balancer_core=info,queue_balancer=info";

pub fn init() -> Result<()> {
    let log_format =
        std::env::var("QUEUE_BALANCER_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .try_init()
        }
        _ => {
            // Development: compact human-readable lines
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_thread_ids(true))
                .try_init()
        }
    }
    .context("Failed to install tracing subscriber")
}
