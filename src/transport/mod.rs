//! Transport subsystem.
//!
//! # Data Flow
//! ```text
//! BackendRequest { path, params }
//!     → client.rs (join onto base URL, single GET under a deadline)
//!     → limits.rs (chunked body read, capped at 48 MiB)
//!     → status / empty-body classification
//!     → raw bytes for the normalizer
//! ```
//!
//! # Design Decisions
//! - The reqwest client is supplied by the caller, already authenticated
//! - Exactly one attempt per call, no retries
//! - Oversized bodies are truncated silently, never rejected

pub mod client;
pub mod http;
pub mod limits;

pub use client::TempoClient;
pub use http::build_http_client;
pub use limits::MAX_RESPONSE_BYTES;
