//! Logging initialization for pipegit.
//!
//! Pipeline output belongs to the calling step, so logs always go to
//! stderr; stdout carries only command results.

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Initialize logging from the configured level.
///
/// `RUST_LOG` overrides the config; `debug_override` (from `--debug`)
/// overrides both.
pub fn init_logging(config: &Config, debug_override: bool) -> Result<()> {
    let filter =
        tracing_subscriber::EnvFilter::new(effective_level(config, debug_override));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    Ok(())
}

fn effective_level(config: &Config, debug_override: bool) -> String {
    if debug_override {
        return "debug".to_string();
    }
    std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.level.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins() {
        let config = Config::default();
        assert_eq!(effective_level(&config, true), "debug");
    }

    #[test]
    fn config_level_used_without_override() {
        let mut config = Config::default();
        config.logging.level = "warn".to_string();
        // RUST_LOG may be set in the environment running the tests; only
        // assert when it is not
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(effective_level(&config, false), "warn");
        }
    }
}
