//! Request building subsystem.
//!
//! # Data Flow
//! ```text
//! Caller parameters (SearchTracesParams, GetTraceParams, ...)
//!     → builder.rs (defaults, clamps, query synthesis, time range)
//!     → BackendRequest { segments, params }
//!     → transport (segments percent-encoded onto the datasource base URL)
//! ```
//!
//! # Design Decisions
//! - A non-empty free-form query always wins over tag filters
//! - The observation time is captured once per call and passed in
//! - Invalid input fails here, before any network call

pub mod builder;
pub mod params;
pub mod scope;

pub use builder::{append_segments, BackendRequest, DEFAULT_TRACE_LIMIT, MAX_TRACE_LIMIT};
pub use params::{GetTraceParams, ListTagNamesParams, ListTagValuesParams, SearchTracesParams};
pub use scope::TagScope;
