//! Result shapes returned by the operations.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One trace matched by a search.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSummary {
    #[serde(rename = "traceID", default)]
    pub trace_id: String,

    #[serde(default)]
    pub root_service_name: String,

    /// Name of the root span.
    #[serde(default)]
    pub root_trace_name: String,

    /// Unix nanoseconds, kept as the backend's string.
    #[serde(default)]
    pub start_time_unix_nano: String,

    /// Omitted by the backend for sub-millisecond traces.
    #[serde(default)]
    pub duration_ms: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_stats: Option<Map<String, Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_set: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_sets: Option<Vec<Value>>,
}

/// Search results in backend order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    #[serde(default)]
    pub traces: Vec<TraceSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Value>,
}

/// A full trace document. Only the trace id is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FullTrace(pub Map<String, Value>);

impl FullTrace {
    /// Trace identifier, if the document carries one.
    pub fn trace_id(&self) -> Option<&str> {
        ["traceID", "traceId"]
            .iter()
            .find_map(|key| self.0.get(*key))
            .and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// Distinct tag names across all scopes. Case-sensitive.
pub type TagNameSet = HashSet<String>;

/// One scope of the tag-name listing as sent by the backend.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagScopeEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}
