//! Logging setup
//!
//! Log records go to stderr so that they never mix with command output.
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::error::ExportError;

/// Install the global subscriber.
///
/// `level` is the filter for this crate used when `RUST_LOG` is unset, e.g.
/// `info` or `debug`.
pub fn init_logging(level: &str) -> Result<(), ExportError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("chart_export={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| ExportError::Config(format!("Failed to initialize logging: {}", e)))
}
