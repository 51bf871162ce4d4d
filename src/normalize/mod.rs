//! Response normalization subsystem.
//!
//! # Data Flow
//! ```text
//! raw bytes from transport
//!     → decode.rs (serde_json into the operation's wire shape)
//!     → types.rs result shapes (SearchResult, FullTrace, TagNameSet, Vec<String>)
//! ```
//!
//! # Design Decisions
//! - Unknown fields are ignored; missing optional fields stay empty
//! - Span payloads and trace documents are opaque JSON, forwarded verbatim
//! - Every decode failure names the operation

pub mod decode;
pub mod types;

pub use decode::{decode_search, decode_tag_names, decode_tag_values, decode_trace};
pub use types::{FullTrace, SearchResult, TagNameSet, TagScopeEntry, TraceSummary};
