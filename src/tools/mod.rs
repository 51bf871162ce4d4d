//! Operation facade and host-facing tool descriptors.
//!
//! # Data Flow
//! ```text
//! call_tool(name, arguments JSON)          search_traces(params), ...
//!     → registry.rs (parse arguments) ──────────┐
//!                                               ▼
//!                                  facade.rs (one operation)
//!                                     → query::builder
//!                                     → DatasourceResolver::resolve
//!                                     → TempoClient::get
//!                                     → normalize::decode_*
//! ```
//!
//! # Design Decisions
//! - Every operation is read-only and idempotent against the backend
//! - No state is shared between calls beyond the reqwest connection pool

pub mod facade;
pub mod registry;

pub use facade::TempoTools;
pub use registry::{tool_definition, tool_definitions, ToolAnnotations, ToolDefinition};
