//! The four Tempo operations.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;

use crate::datasource::DatasourceResolver;
use crate::error::{Operation, TempoResult};
use crate::normalize::{
    decode_search, decode_tag_names, decode_tag_values, decode_trace, FullTrace, SearchResult,
    TagNameSet,
};
use crate::query::builder::{search_request, tag_names_request, tag_values_request, trace_request};
use crate::query::{
    BackendRequest, GetTraceParams, ListTagNamesParams, ListTagValuesParams, SearchTracesParams,
};
use crate::resilience::timeouts::{effective_deadline, MAX_REQUEST_DURATION};
use crate::transport::TempoClient;

/// Entry point for querying Tempo datasources.
///
/// Cheap to clone and safe to share across tasks.
#[derive(Clone)]
pub struct TempoTools {
    resolver: Arc<dyn DatasourceResolver>,
    http: Client,
    deadline: Duration,
}

impl TempoTools {
    /// `http` must already be configured with authentication and TLS policy.
    pub fn new(resolver: Arc<dyn DatasourceResolver>, http: Client) -> Self {
        Self {
            resolver,
            http,
            deadline: MAX_REQUEST_DURATION,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = effective_deadline(deadline);
        self
    }

    async fn fetch(
        &self,
        operation: Operation,
        datasource_uid: &str,
        request: &BackendRequest,
    ) -> TempoResult<Vec<u8>> {
        let datasource = self.resolver.resolve(datasource_uid).await?;
        let client =
            TempoClient::new(self.http.clone(), &datasource.base_url)?.with_deadline(self.deadline);
        client.get(operation, request).await
    }

    /// Search for traces by TraceQL query or tag filters.
    pub async fn search_traces(&self, params: SearchTracesParams) -> TempoResult<SearchResult> {
        let request = search_request(&params, Utc::now())?;
        let body = self
            .fetch(Operation::SearchTraces, &params.datasource_uid, &request)
            .await?;
        let result = decode_search(&body)?;

        tracing::info!(
            datasource_uid = %params.datasource_uid,
            traces = result.traces.len(),
            "Trace search completed"
        );
        Ok(result)
    }

    /// Fetch one complete trace by id.
    pub async fn get_trace(&self, params: GetTraceParams) -> TempoResult<FullTrace> {
        let request = trace_request(&params)?;
        let body = self
            .fetch(Operation::GetTrace, &params.datasource_uid, &request)
            .await?;
        let trace = decode_trace(&body)?;

        tracing::info!(
            datasource_uid = %params.datasource_uid,
            trace_id = %params.trace_id,
            bytes = body.len(),
            "Trace retrieved"
        );
        Ok(trace)
    }

    /// Distinct tag names, across all scopes or the requested one.
    pub async fn list_tag_names(&self, params: ListTagNamesParams) -> TempoResult<TagNameSet> {
        let request = tag_names_request(&params)?;
        let body = self
            .fetch(Operation::ListTagNames, &params.datasource_uid, &request)
            .await?;
        let names = decode_tag_names(&body)?;

        tracing::info!(
            datasource_uid = %params.datasource_uid,
            scope = ?params.scope,
            tags = names.len(),
            "Tag names listed"
        );
        Ok(names)
    }

    /// Values seen for one tag, as returned by the backend.
    pub async fn list_tag_values(&self, params: ListTagValuesParams) -> TempoResult<Vec<String>> {
        let request = tag_values_request(&params)?;
        let body = self
            .fetch(Operation::ListTagValues, &params.datasource_uid, &request)
            .await?;
        let values = decode_tag_values(&body)?;

        tracing::info!(
            datasource_uid = %params.datasource_uid,
            tag_name = %params.tag_name,
            values = values.len(),
            "Tag values listed"
        );
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasource::{Datasource, StaticResolver};
    use crate::error::TempoError;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tools_for(server: &MockServer) -> TempoTools {
        let resolver = StaticResolver::new([Datasource {
            uid: "tempo".to_string(),
            name: None,
            base_url: server.uri(),
        }]);
        TempoTools::new(Arc::new(resolver), Client::new())
    }

    #[tokio::test]
    async fn test_unknown_datasource_fails_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = tools_for(&server)
            .list_tag_values(ListTagValuesParams {
                datasource_uid: "loki".to_string(),
                tag_name: "service.name".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invalid_time_range_fails_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = tools_for(&server)
            .search_traces(SearchTracesParams {
                datasource_uid: "tempo".to_string(),
                start: Some(2_000),
                end: Some(1_000),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TempoError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_list_tag_names_with_scope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search/tags"))
            .and(query_param("scope", "resource"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"scopes":[{"name":"resource","tags":["service.name","k8s.pod.name"]}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let names = tools_for(&server)
            .list_tag_names(ListTagNamesParams {
                datasource_uid: "tempo".to_string(),
                scope: Some("resource".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(names.len(), 2);
        assert!(names.contains("service.name"));
    }

    #[tokio::test]
    async fn test_get_trace() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/traces/abc123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"traceID":"abc123","batches":[]}"#),
            )
            .mount(&server)
            .await;

        let trace = tools_for(&server)
            .get_trace(GetTraceParams {
                datasource_uid: "tempo".to_string(),
                trace_id: "abc123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(trace.trace_id(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_search_forwards_min_and_max_duration() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("minDuration", "100ms"))
            .and(query_param("maxDuration", "2s"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"traces":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let result = tools_for(&server)
            .search_traces(SearchTracesParams {
                datasource_uid: "tempo".to_string(),
                min_duration: Some("100ms".to_string()),
                max_duration: Some("2s".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(result.traces.is_empty());
    }
}
