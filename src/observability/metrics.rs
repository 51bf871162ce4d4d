//! Metrics collection.
//!
//! # Metrics
//! - `tempo_requests_total` (counter): requests by operation, outcome
//! - `tempo_request_duration_seconds` (histogram): latency by operation
//! - `tempo_response_bytes` (histogram): body size by operation
//! - `tempo_response_truncated_total` (counter): bodies cut at the size cap
//! - `tempo_decode_failures_total` (counter): undecodable bodies

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

use crate::error::{Operation, TempoError, TempoResult};

/// Register metric descriptions with the installed recorder.
pub fn describe_metrics() {
    describe_counter!("tempo_requests_total", "Tempo API requests by operation and outcome");
    describe_histogram!(
        "tempo_request_duration_seconds",
        Unit::Seconds,
        "Tempo API request latency"
    );
    describe_histogram!("tempo_response_bytes", Unit::Bytes, "Tempo API response body size");
    describe_counter!(
        "tempo_response_truncated_total",
        "Responses truncated at the body size limit"
    );
    describe_counter!(
        "tempo_decode_failures_total",
        "Responses that could not be decoded"
    );
}

/// Outcome label for a transport result.
pub fn outcome<T>(result: &TempoResult<T>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(TempoError::Status { .. }) => "status",
        Err(TempoError::EmptyResponse) => "empty",
        Err(TempoError::Timeout(_)) => "timeout",
        Err(_) => "error",
    }
}

pub fn record_request(operation: Operation, outcome: &'static str, started: Instant) {
    counter!(
        "tempo_requests_total",
        "operation" => operation.as_str(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("tempo_request_duration_seconds", "operation" => operation.as_str())
        .record(started.elapsed().as_secs_f64());
}

pub fn record_response_bytes(operation: Operation, bytes: usize) {
    histogram!("tempo_response_bytes", "operation" => operation.as_str()).record(bytes as f64);
}

pub fn record_truncated(operation: Operation) {
    counter!("tempo_response_truncated_total", "operation" => operation.as_str()).increment(1);
}

pub fn record_decode_failure(operation: Operation) {
    counter!("tempo_decode_failures_total", "operation" => operation.as_str()).increment(1);
}
