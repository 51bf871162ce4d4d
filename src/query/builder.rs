//! Backend request construction.
//!
//! # Responsibilities
//! - Map each operation's parameters onto a Tempo HTTP API path
//! - Synthesize a TraceQL query from tag filters when no query is given
//! - Clamp the trace limit and resolve the search time range
//! - Append path segments to a base URL with exactly one separator,
//!   percent-encoding caller-supplied segments

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use url::Url;

use crate::error::{TempoError, TempoResult};
use crate::query::params::{
    GetTraceParams, ListTagNamesParams, ListTagValuesParams, SearchTracesParams,
};
use crate::query::scope::TagScope;

/// Number of traces returned when the caller does not ask for a count.
pub const DEFAULT_TRACE_LIMIT: i64 = 20;

/// Upper bound on the number of traces per search.
pub const MAX_TRACE_LIMIT: i64 = 100;

/// Default search window before the observation time.
pub const DEFAULT_LOOKBACK_NANOS: i64 = 60 * 60 * 1_000_000_000;

pub const SEARCH_PATH: &str = "/api/search";
pub const TAG_NAMES_PATH: &str = "/api/search/tags";

/// A relative backend path plus its query parameters, in insertion order.
///
/// The path is held as unencoded segments. Encoding happens when they are
/// appended to a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRequest {
    pub segments: Vec<String>,
    pub params: Vec<(&'static str, String)>,
}

impl BackendRequest {
    /// Request for a fixed path such as `/api/search`.
    pub fn new(path: &str) -> Self {
        Self::from_segments(path.split('/').filter(|s| !s.is_empty()))
    }

    fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            params: Vec::new(),
        }
    }

    /// Unencoded path, for logs and assertions.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }

    fn push(&mut self, name: &'static str, value: impl Into<String>) {
        self.params.push((name, value.into()));
    }

    fn push_opt(&mut self, name: &'static str, value: Option<&str>) {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.push(name, v);
        }
    }

    /// First value of the named parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Append `segments` to the path of `base` with exactly one `/` between
/// each. Every segment is percent-encoded, including `/` and `%`.
pub fn append_segments<I, S>(base: &str, segments: I) -> TempoResult<Url>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut url = Url::parse(base).map_err(|source| TempoError::InvalidUrl {
        url: base.to_string(),
        source,
    })?;
    url.path_segments_mut()
        .map_err(|_| TempoError::Config(format!("base URL '{}' cannot carry a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Effective trace limit: non-positive or absent → default, capped at the maximum.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    match limit {
        Some(n) if n > 0 => n.min(MAX_TRACE_LIMIT),
        _ => DEFAULT_TRACE_LIMIT,
    }
}

/// Resolve `[start, end]` in Unix nanoseconds. Zero or absent bounds default
/// to `now - 1h` and `now` respectively. When only `end` is given and it
/// lies more than an hour in the past, start defaults to `end - 1h`.
pub fn resolve_time_range(
    start: Option<i64>,
    end: Option<i64>,
    now: DateTime<Utc>,
) -> TempoResult<(i64, i64)> {
    let now_nanos = now.timestamp_nanos_opt().ok_or_else(|| {
        TempoError::InvalidArgument(format!("observation time {} is out of range", now))
    })?;

    let end = end.filter(|e| *e != 0).unwrap_or(now_nanos);
    // A defaulted start never lands after an explicit end.
    let start = start.filter(|s| *s != 0).unwrap_or_else(|| {
        let default_start = now_nanos - DEFAULT_LOOKBACK_NANOS;
        if default_start < end {
            default_start
        } else {
            end.saturating_sub(DEFAULT_LOOKBACK_NANOS)
        }
    });

    if start >= end {
        return Err(TempoError::InvalidArgument(format!(
            "start ({}) must be before end ({})",
            start, end
        )));
    }
    Ok((start, end))
}

fn quote_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Build a TraceQL query with one equality clause per tag, joined by `&&`.
pub fn tag_filter_query(tags: &BTreeMap<String, String>) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    let clauses: Vec<String> = tags
        .iter()
        .map(|(attr, value)| format!("{{.{}=\"{}\"}}", attr, quote_value(value)))
        .collect();
    Some(clauses.join(" && "))
}

/// The query sent to the backend: an explicit non-empty query wins,
/// otherwise the tag filters are synthesized, otherwise none.
pub fn effective_query(query: Option<&str>, tags: &BTreeMap<String, String>) -> Option<String> {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => Some(q.to_string()),
        None => tag_filter_query(tags),
    }
}

/// Validate a caller-supplied path segment. Reserved characters are
/// allowed since the segment is percent-encoded later; dot segments are not.
pub(crate) fn path_segment<'a>(field: &str, value: &'a str) -> TempoResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TempoError::InvalidArgument(format!("{} must not be empty", field)));
    }
    if value == "." || value == ".." {
        return Err(TempoError::InvalidArgument(format!(
            "{} must not be a dot segment, got '{}'",
            field, value
        )));
    }
    Ok(value)
}

/// `GET /api/search` with q, minDuration, maxDuration, limit, start, end.
pub fn search_request(
    params: &SearchTracesParams,
    now: DateTime<Utc>,
) -> TempoResult<BackendRequest> {
    let mut req = BackendRequest::new(SEARCH_PATH);

    if let Some(q) = effective_query(params.query.as_deref(), &params.tags) {
        req.push("q", q);
    }
    req.push_opt("minDuration", params.min_duration.as_deref());
    req.push_opt("maxDuration", params.max_duration.as_deref());
    req.push("limit", clamp_limit(params.limit).to_string());

    let (start, end) = resolve_time_range(params.start, params.end, now)?;
    req.push("start", start.to_string());
    req.push("end", end.to_string());

    Ok(req)
}

/// `GET /api/traces/{traceId}`.
pub fn trace_request(params: &GetTraceParams) -> TempoResult<BackendRequest> {
    let trace_id = path_segment("traceId", &params.trace_id)?;
    Ok(BackendRequest::from_segments(["api", "traces", trace_id]))
}

/// `GET /api/search/tags`, optionally narrowed to one scope.
pub fn tag_names_request(params: &ListTagNamesParams) -> TempoResult<BackendRequest> {
    let mut req = BackendRequest::new(TAG_NAMES_PATH);
    if let Some(scope) = TagScope::parse_optional(params.scope.as_deref())? {
        req.push("scope", scope.as_str());
    }
    Ok(req)
}

/// `GET /api/search/tag/{tagName}/values`.
pub fn tag_values_request(params: &ListTagValuesParams) -> TempoResult<BackendRequest> {
    let tag_name = path_segment("tagName", &params.tag_name)?;
    Ok(BackendRequest::from_segments([
        "api", "search", "tag", tag_name, "values",
    ]))
}
