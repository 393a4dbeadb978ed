//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Configure log level from config or environment
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` takes precedence over the configured level
//! - Never log custody API keys or other secrets

use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `default_level` is used when `RUST_LOG` is not set. Safe to call more
/// than once; subsequent calls are no-ops.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
