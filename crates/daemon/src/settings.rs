//! Configuration loading
//!
//! Every `PipelineConfig` field can be overridden through an environment
//! variable with the `QUEUE_BALANCER_` prefix, e.g.
//!
//! ```text
//! QUEUE_BALANCER_QUEUE_COUNT=4 \
//! QUEUE_BALANCER_PRODUCE_LIMIT=100 \
//! QUEUE_BALANCER_SEED=7 \
//!     ./queue-balancer
//! ```

use anyhow::{Context, Result};
use config::{Config, Environment};
use queue_balancer_core::PipelineConfig;

pub const ENV_PREFIX: &str = "QUEUE_BALANCER";

/// Load configuration from the process environment
pub fn load() -> Result<PipelineConfig> {
    from_environment(Environment::with_prefix(ENV_PREFIX))
}

fn from_environment(environment: Environment) -> Result<PipelineConfig> {
    let config: PipelineConfig = Config::builder()
        .add_source(environment.try_parsing(true))
        .build()
        .context("Failed to read configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = from_environment(env(&[])).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = from_environment(env(&[
            ("QUEUE_BALANCER_QUEUE_COUNT", "5"),
            ("QUEUE_BALANCER_PRODUCE_LIMIT", "100"),
            ("QUEUE_BALANCER_SEED", "7"),
            ("QUEUE_BALANCER_RUN_DIAGNOSTIC", "false"),
        ]))
        .unwrap();

        assert_eq!(config.queue_count, 5);
        assert_eq!(config.produce_limit, Some(100));
        assert_eq!(config.seed, Some(7));
        assert!(!config.run_diagnostic);
        assert_eq!(config.max_capacity, 30);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(from_environment(env(&[("QUEUE_BALANCER_QUEUE_COUNT", "0")])).is_err());
        assert!(from_environment(env(&[("QUEUE_BALANCER_MAX_CAPACITY", "lots")])).is_err());
    }
}
