//! Command-line entry point for querying Tempo.
//!
//! # Data Flow
//!
//! ```text
//!   args ──▶ config (TOML + GRAFANA_* env) ──▶ http client + resolver
//!                                                      │
//!                                                      ▼
//!   stdout ◀── pretty JSON ◀── normalize ◀── transport ◀── query builder
//! ```
//!
//! Logs go to stderr so results can be piped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use tempo_query::config::validation::validate_config;
use tempo_query::config::{load_or_default, ConfigError};
use tempo_query::datasource::resolver_from_config;
use tempo_query::observability::{logging, metrics};
use tempo_query::query::{
    GetTraceParams, ListTagNamesParams, ListTagValuesParams, SearchTracesParams,
};
use tempo_query::tools::tool_definitions;
use tempo_query::transport::build_http_client;
use tempo_query::{AdapterConfig, TempoTools};

#[derive(Parser)]
#[command(name = "tempo-query")]
#[command(about = "Query Tempo traces and tags", version, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Grafana base URL (overrides config and GRAFANA_URL)
    #[arg(long, global = true)]
    grafana_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Query(QueryCommand),
    /// Print tool descriptors as JSON
    Tools,
}

#[derive(Subcommand)]
enum QueryCommand {
    /// Search for traces by TraceQL query or tags
    Search(SearchArgs),
    /// Fetch a single trace by ID
    Trace {
        #[arg(short, long)]
        datasource: String,
        trace_id: String,
    },
    /// List tag names, optionally restricted to a scope
    TagNames {
        #[arg(short, long)]
        datasource: String,
        /// intrinsic, span or resource
        #[arg(short, long)]
        scope: Option<String>,
    },
    /// List values observed for a tag
    TagValues {
        #[arg(short, long)]
        datasource: String,
        tag_name: String,
    },
}

#[derive(Args)]
struct SearchArgs {
    #[arg(short, long)]
    datasource: String,

    /// TraceQL query; takes precedence over --tag
    #[arg(short, long)]
    query: Option<String>,

    /// Attribute filter as key=value (repeatable)
    #[arg(short, long = "tag", value_parser = parse_tag)]
    tags: Vec<(String, String)>,

    #[arg(long)]
    min_duration: Option<String>,

    #[arg(long)]
    max_duration: Option<String>,

    #[arg(short, long)]
    limit: Option<i64>,

    /// Range start in Unix nanoseconds
    #[arg(long)]
    start: Option<i64>,

    /// Range end in Unix nanoseconds
    #[arg(long)]
    end: Option<i64>,
}

fn parse_tag(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}

impl SearchArgs {
    fn into_params(self) -> SearchTracesParams {
        SearchTracesParams {
            datasource_uid: self.datasource,
            query: self.query,
            tags: self.tags.into_iter().collect::<BTreeMap<_, _>>(),
            min_duration: self.min_duration,
            max_duration: self.max_duration,
            limit: self.limit,
            start: self.start,
            end: self.end,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(output) => {
            match serde_json::to_string_pretty(&output) {
                Ok(text) => println!("{}", text),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the config file and environment, apply CLI overrides, then
/// validate the merged result.
fn load_settings(
    path: Option<&Path>,
    grafana_url: Option<String>,
) -> Result<AdapterConfig, ConfigError> {
    let mut config = load_or_default(path)?;
    if let Some(url) = grafana_url {
        config.grafana.url = url;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<Value, Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Tools => Ok(serde_json::to_value(tool_definitions())?),
        Commands::Query(command) => {
            let config = load_settings(cli.config.as_deref(), cli.grafana_url)?;
            run_query(&config, command).await
        }
    }
}

async fn run_query(
    config: &AdapterConfig,
    command: QueryCommand,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Warning: logging not initialized: {}", e);
    }
    if config.observability.metrics_enabled {
        metrics::describe_metrics();
    }

    tracing::debug!(
        grafana_url = %config.grafana.url,
        datasources = config.datasources.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let http = build_http_client(config)?;
    let resolver = resolver_from_config(config, http.clone());
    let tools = TempoTools::new(resolver, http)
        .with_deadline(Duration::from_secs(config.timeouts.request_secs));

    let output = match command {
        QueryCommand::Search(args) => {
            serde_json::to_value(tools.search_traces(args.into_params()).await?)?
        }
        QueryCommand::Trace {
            datasource,
            trace_id,
        } => serde_json::to_value(
            tools
                .get_trace(GetTraceParams {
                    datasource_uid: datasource,
                    trace_id,
                })
                .await?,
        )?,
        QueryCommand::TagNames { datasource, scope } => {
            let names = tools
                .list_tag_names(ListTagNamesParams {
                    datasource_uid: datasource,
                    scope,
                })
                .await?;
            let mut sorted: Vec<String> = names.into_iter().collect();
            sorted.sort();
            serde_json::to_value(sorted)?
        }
        QueryCommand::TagValues {
            datasource,
            tag_name,
        } => serde_json::to_value(
            tools
                .list_tag_values(ListTagValuesParams {
                    datasource_uid: datasource,
                    tag_name,
                })
                .await?,
        )?,
    };

    Ok(output)
}
