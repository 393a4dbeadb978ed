//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Whatever metrics recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Structured logging via the `tracing` macros
//! - Metrics go through the `metrics` facade; this library never installs
//!   a recorder itself
//! - Metric updates are cheap (atomic increments)

pub mod logging;
pub mod metrics;
