//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to backend:
//!     → timeouts.rs (last-resort deadline over send + body read)
//!     → On failure: surfaced to the caller, never retried here
//! ```
//!
//! # Design Decisions
//! - Every backend call has a deadline of at most 30 seconds
//! - Exactly one attempt per call; retry policy belongs to the caller

pub mod timeouts;
