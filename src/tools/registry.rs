//! Tool descriptors and JSON dispatch for hosting environments.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Operation, TempoError, TempoResult};
use crate::tools::facade::TempoTools;

/// Scheduling hints for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolAnnotations {
    pub title: &'static str,
    pub read_only_hint: bool,
    pub idempotent_hint: bool,
}

/// A named operation with its declared input and output shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub output_schema: Value,
    pub annotations: ToolAnnotations,
}

fn datasource_uid_property() -> Value {
    json!({
        "type": "string",
        "description": "The UID of the datasource to query"
    })
}

fn search_input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "datasourceUid": datasource_uid_property(),
            "query": {
                "type": "string",
                "description": "The TraceQL query to execute. Example: {span.http.status_code=500} or {resource.service.name=\"checkout\"} or {.cluster=\"prod\"}"
            },
            "tags": {
                "type": "object",
                "additionalProperties": { "type": "string" },
                "description": "Tags to filter traces by. This is an alternative to using a query string"
            },
            "minDuration": {
                "type": "string",
                "description": "Minimum duration of traces (e.g. '100ms', '1s')"
            },
            "maxDuration": {
                "type": "string",
                "description": "Maximum duration of traces (e.g. '100ms', '1s')"
            },
            "limit": {
                "type": "integer",
                "description": "The maximum number of traces to return (default: 20, max: 100)"
            },
            "start": {
                "type": "integer",
                "description": "Start time in Unix nanoseconds. Defaults to 1 hour ago"
            },
            "end": {
                "type": "integer",
                "description": "End time in Unix nanoseconds. Defaults to now"
            }
        },
        "required": ["datasourceUid"]
    })
}

fn search_output_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "traces": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "traceID": { "type": "string" },
                        "rootServiceName": { "type": "string" },
                        "rootTraceName": { "type": "string" },
                        "startTimeUnixNano": { "type": "string" },
                        "durationMs": { "type": "integer" },
                        "serviceStats": { "type": "object" },
                        "spanSet": {},
                        "spanSets": { "type": "array" }
                    }
                }
            },
            "metrics": {}
        }
    })
}

fn string_list_schema() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

/// Descriptor for one operation.
pub fn tool_definition(operation: Operation) -> ToolDefinition {
    match operation {
        Operation::SearchTraces => ToolDefinition {
            name: operation.as_str(),
            description: "Search for traces in Tempo using TraceQL queries or tags. Returns a list of matching traces with metadata like trace ID, service name, duration, and start time. Supports filtering by duration and time range.",
            input_schema: search_input_schema(),
            output_schema: search_output_schema(),
            annotations: annotations("Search Tempo traces"),
        },
        Operation::GetTrace => ToolDefinition {
            name: operation.as_str(),
            description: "Retrieve a specific trace from Tempo by its trace ID. Returns the complete trace data including all spans, their relationships, attributes, and timing information.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "datasourceUid": datasource_uid_property(),
                    "traceId": { "type": "string", "description": "The trace ID to retrieve" }
                },
                "required": ["datasourceUid", "traceId"]
            }),
            output_schema: json!({ "type": "object" }),
            annotations: annotations("Get Tempo trace"),
        },
        Operation::ListTagNames => ToolDefinition {
            name: operation.as_str(),
            description: "List all available tag names in Tempo. Can be filtered by scope (intrinsic, span, resource). Returns a list of tag names that can be used for searching traces.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "datasourceUid": datasource_uid_property(),
                    "scope": {
                        "type": "string",
                        "enum": ["", "intrinsic", "span", "resource"],
                        "description": "The scope of tags to retrieve: 'intrinsic', 'span', 'resource', or leave empty for all"
                    }
                },
                "required": ["datasourceUid"]
            }),
            output_schema: string_list_schema(),
            annotations: annotations("List Tempo tag names"),
        },
        Operation::ListTagValues => ToolDefinition {
            name: operation.as_str(),
            description: "List all values for a specific tag name in Tempo. Useful for discovering what values are available for filtering traces.",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "datasourceUid": datasource_uid_property(),
                    "tagName": { "type": "string", "description": "The tag name to get values for" }
                },
                "required": ["datasourceUid", "tagName"]
            }),
            output_schema: string_list_schema(),
            annotations: annotations("List Tempo tag values"),
        },
    }
}

fn annotations(title: &'static str) -> ToolAnnotations {
    ToolAnnotations {
        title,
        read_only_hint: true,
        idempotent_hint: true,
    }
}

/// Descriptors for all operations, in registration order.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    Operation::all().into_iter().map(tool_definition).collect()
}

fn parse_arguments<T: DeserializeOwned>(operation: Operation, arguments: Value) -> TempoResult<T> {
    serde_json::from_value(arguments).map_err(|e| {
        TempoError::InvalidArgument(format!("invalid arguments for {}: {}", operation, e))
    })
}

fn to_json<T: Serialize>(operation: Operation, value: &T) -> TempoResult<Value> {
    serde_json::to_value(value).map_err(|e| TempoError::decode(operation, e))
}

impl TempoTools {
    /// Dispatch a tool call by name with JSON arguments.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> TempoResult<Value> {
        let operation = Operation::from_name(name)
            .ok_or_else(|| TempoError::InvalidArgument(format!("unknown tool '{}'", name)))?;

        tracing::debug!(tool = %operation, "Dispatching tool call");

        match operation {
            Operation::SearchTraces => {
                let result = self
                    .search_traces(parse_arguments(operation, arguments)?)
                    .await?;
                to_json(operation, &result)
            }
            Operation::GetTrace => {
                let trace = self.get_trace(parse_arguments(operation, arguments)?).await?;
                to_json(operation, &trace)
            }
            Operation::ListTagNames => {
                let names = self
                    .list_tag_names(parse_arguments(operation, arguments)?)
                    .await?;
                let mut sorted: Vec<String> = names.into_iter().collect();
                sorted.sort();
                to_json(operation, &sorted)
            }
            Operation::ListTagValues => {
                let values = self
                    .list_tag_values(parse_arguments(operation, arguments)?)
                    .await?;
                to_json(operation, &values)
            }
        }
    }
}
