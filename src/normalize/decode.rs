//! Decoding of Tempo API response bodies.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Operation, TempoError, TempoResult};
use crate::normalize::types::{FullTrace, SearchResult, TagNameSet, TagScopeEntry};
use crate::observability::metrics;

#[derive(Debug, Deserialize)]
struct TagNamesResponse {
    #[serde(default)]
    scopes: Vec<TagScopeEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagValuesResponse {
    #[serde(default)]
    tag_values: Vec<String>,
}

fn decode<T: DeserializeOwned>(operation: Operation, bytes: &[u8]) -> TempoResult<T> {
    serde_json::from_slice(bytes).map_err(|source| {
        metrics::record_decode_failure(operation);
        TempoError::decode(operation, source)
    })
}

pub fn decode_search(bytes: &[u8]) -> TempoResult<SearchResult> {
    decode(Operation::SearchTraces, bytes)
}

pub fn decode_trace(bytes: &[u8]) -> TempoResult<FullTrace> {
    decode(Operation::GetTrace, bytes)
}

/// Merge the tags of every scope into one set, dropping scope names.
pub fn flatten_scopes(scopes: Vec<TagScopeEntry>) -> TagNameSet {
    scopes.into_iter().flat_map(|scope| scope.tags).collect()
}

pub fn decode_tag_names(bytes: &[u8]) -> TempoResult<TagNameSet> {
    let response: TagNamesResponse = decode(Operation::ListTagNames, bytes)?;
    Ok(flatten_scopes(response.scopes))
}

pub fn decode_tag_values(bytes: &[u8]) -> TempoResult<Vec<String>> {
    let response: TagValuesResponse = decode(Operation::ListTagValues, bytes)?;
    Ok(response.tag_values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_search() {
        let body = br#"{
            "traces": [
                {
                    "traceID": "2f3e0cee77ae5dc9c17ade3689eb2e54",
                    "rootServiceName": "shop-backend",
                    "rootTraceName": "update-billing",
                    "startTimeUnixNano": "1684778327699392724",
                    "durationMs": 557,
                    "serviceStats": {"shop-backend": {"spanCount": 4}},
                    "spanSets": [{"spans": [{"spanID": "563d623c76514f8e"}], "matched": 1}],
                    "unknownField": true
                },
                {
                    "traceID": "1a2b",
                    "rootServiceName": "checkout"
                }
            ],
            "metrics": {"inspectedTraces": 10}
        }"#;

        let result = decode_search(body).unwrap();
        assert_eq!(result.traces.len(), 2);

        let first = &result.traces[0];
        assert_eq!(first.trace_id, "2f3e0cee77ae5dc9c17ade3689eb2e54");
        assert_eq!(first.root_trace_name, "update-billing");
        assert_eq!(first.start_time_unix_nano, "1684778327699392724");
        assert_eq!(first.duration_ms, 557);
        assert!(first.service_stats.is_some());
        assert_eq!(first.span_sets.as_ref().map(Vec::len), Some(1));

        // Backend order preserved, missing fields left empty
        let second = &result.traces[1];
        assert_eq!(second.trace_id, "1a2b");
        assert_eq!(second.duration_ms, 0);
        assert!(second.start_time_unix_nano.is_empty());
        assert!(second.span_set.is_none());

        assert_eq!(result.metrics.unwrap()["inspectedTraces"], 10);
    }

    #[test]
    fn test_decode_search_empty_object() {
        let result = decode_search(b"{}").unwrap();
        assert!(result.traces.is_empty());
        assert!(result.metrics.is_none());
    }

    #[test]
    fn test_decode_trace_passes_document_through() {
        let body = br#"{"traceID":"abc","batches":[{"scopeSpans":[{"spans":[{"name":"GET /"}]}]}]}"#;
        let trace = decode_trace(body).unwrap();
        assert_eq!(trace.trace_id(), Some("abc"));
        assert_eq!(
            trace.get("batches").unwrap()[0]["scopeSpans"][0]["spans"][0]["name"],
            "GET /"
        );
    }

    #[test]
    fn test_decode_trace_rejects_non_object() {
        let err = decode_trace(b"[1,2,3]").unwrap_err();
        assert!(matches!(
            err,
            TempoError::Decode {
                operation: Operation::GetTrace,
                ..
            }
        ));
    }

    #[test]
    fn test_tag_names_flattened_without_duplicates() {
        let body = br#"{"scopes":[
            {"name":"span","tags":["a","b"]},
            {"name":"resource","tags":["b","c"]}
        ]}"#;
        let names = decode_tag_names(body).unwrap();
        let expected: TagNameSet = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_tag_names_case_sensitive() {
        let body = br#"{"scopes":[{"name":"span","tags":["Foo","foo","foo"]}]}"#;
        let names = decode_tag_names(body).unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains("Foo"));
    }

    #[test]
    fn test_tag_values_verbatim() {
        let body = br#"{"tagValues":["checkout","cart","checkout"]}"#;
        assert_eq!(
            decode_tag_values(body).unwrap(),
            vec!["checkout", "cart", "checkout"]
        );
    }

    #[test]
    fn test_decode_failure_names_operation() {
        let err = decode_tag_values(b"<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("list_tempo_tag_values"));

        let err = decode_search(br#"{"traces": "nope"}"#).unwrap_err();
        assert!(err.to_string().contains("search_tempo_traces"));
    }

    #[test]
    fn test_truncated_body_surfaces_as_decode_error() {
        let full = br#"{"traceID":"abc","batches":[]}"#;
        let err = decode_trace(&full[..full.len() - 5]).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Decode);
    }
}
