//! Caller-facing parameter records, one per operation.
//!
//! Field names serialize in camelCase to match the tool input schemas.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Parameters for searching traces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTracesParams {
    /// UID of the datasource to query.
    pub datasource_uid: String,

    /// TraceQL query passed through verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// Attribute equality filters, used only when `query` is empty.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    /// Minimum trace duration literal (e.g. "100ms").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<String>,

    /// Maximum trace duration literal (e.g. "1s").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<String>,

    /// Maximum number of traces (default 20, max 100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    /// Range start in Unix nanoseconds (default: one hour ago).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// Range end in Unix nanoseconds (default: now).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

/// Parameters for fetching one trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTraceParams {
    pub datasource_uid: String,
    pub trace_id: String,
}

/// Parameters for listing tag names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTagNamesParams {
    pub datasource_uid: String,

    /// One of `intrinsic`, `span`, `resource`; empty or absent for all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Parameters for listing the values of one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTagValuesParams {
    pub datasource_uid: String,
    pub tag_name: String,
}
