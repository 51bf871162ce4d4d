//! Error types for Tempo query operations.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// The four operations exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SearchTraces,
    GetTrace,
    ListTagNames,
    ListTagValues,
}

impl Operation {
    /// Tool name under which the operation is registered with the host.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SearchTraces => "search_tempo_traces",
            Operation::GetTrace => "get_tempo_trace",
            Operation::ListTagNames => "list_tempo_tag_names",
            Operation::ListTagValues => "list_tempo_tag_values",
        }
    }

    pub fn all() -> [Operation; 4] {
        [
            Operation::SearchTraces,
            Operation::GetTrace,
            Operation::ListTagNames,
            Operation::ListTagValues,
        ]
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Operation::all().into_iter().find(|op| op.as_str() == name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Failed before any network call.
    Configuration,
    /// Connection failure, non-2xx status, empty body or timeout.
    Transport,
    /// Body could not be decoded into the operation's result shape.
    Decode,
}

/// Errors that can occur while querying Tempo.
#[derive(Debug, Error)]
pub enum TempoError {
    /// No datasource is registered under the given UID.
    #[error("datasource not found: {0}")]
    DatasourceNotFound(String),

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A base URL or request URL could not be parsed.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Caller input rejected before building a request.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Connection or protocol failure from the HTTP client.
    #[error("executing request: {0}")]
    Request(#[from] reqwest::Error),

    /// The request did not complete within the deadline.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The backend answered with a non-success status.
    #[error("Tempo API returned status code {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered 2xx with a zero-length body.
    #[error("empty response from Tempo API")]
    EmptyResponse,

    /// The body was not valid for the operation's result shape.
    #[error("unmarshalling {operation} response: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl TempoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TempoError::DatasourceNotFound(_)
            | TempoError::Config(_)
            | TempoError::InvalidUrl { .. }
            | TempoError::InvalidArgument(_) => ErrorKind::Configuration,
            TempoError::Request(_)
            | TempoError::Timeout(_)
            | TempoError::Status { .. }
            | TempoError::EmptyResponse => ErrorKind::Transport,
            TempoError::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// True when the datasource lookup failed because the UID is unknown.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TempoError::DatasourceNotFound(_))
    }

    pub fn decode(operation: Operation, source: serde_json::Error) -> Self {
        TempoError::Decode { operation, source }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TempoError::Status { status, .. } => Some(*status),
            TempoError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Tempo operations.
pub type TempoResult<T> = Result<T, TempoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = TempoError::Status {
            status: 500,
            body: "boom".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_decode_error_names_operation() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = TempoError::decode(Operation::ListTagNames, source);
        assert!(err.to_string().contains("list_tempo_tag_names"));
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            TempoError::DatasourceNotFound("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert!(TempoError::DatasourceNotFound("x".into()).is_not_found());
        assert!(!TempoError::EmptyResponse.is_not_found());
        assert_eq!(TempoError::EmptyResponse.kind(), ErrorKind::Transport);
        assert_eq!(TempoError::Timeout(Duration::from_secs(30)).kind(), ErrorKind::Transport);
    }

    #[test]
    fn test_operation_names_round_trip() {
        for op in Operation::all() {
            assert_eq!(Operation::from_name(op.as_str()), Some(op));
        }
        assert_eq!(Operation::from_name("nope"), None);
    }
}
