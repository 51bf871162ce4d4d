//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! transport + tools produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters, histograms via the `metrics` facade)
//!
//! Consumers:
//!     → Log aggregation (stderr, pretty or JSON)
//!     → Whatever recorder the host installs
//! ```
//!
//! # Design Decisions
//! - Structured fields (operation, datasource_uid, status) on every event
//! - Metric updates are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
