//! sift: command-line access to the query, results, and insights tooling.
//!
//! Every subcommand prints JSON on stdout. Logs go to stderr (or to
//! `LOG_FILE`) so the output stays machine-readable.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sift_core::{PatternType, SearchConfig};
use sift_insights::{
    create_line_chart_content, create_line_chart_content_from_indexed_series, IndexedSeriesData,
    InsightData, SeriesDefinition,
};
use sift_query::{
    scan_search_query, update_query, QueryState, QueryUpdate, SearchQueryState,
    SubmitSearchParameters, SubmitSource, Token,
};
use sift_results::{limit_group_with_config, limit_group_with_context, MatchGroup};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str =
    "sift=warn,sift_core=warn,sift_query=warn,sift_results=warn,sift_insights=warn";

#[derive(Parser)]
#[command(name = "sift")]
#[command(author, version, about = "Search query tooling")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tokenize a query
    Scan {
        /// Query to scan
        query: String,
    },

    /// Apply updates to a query and print the result
    Apply {
        /// Query to update
        query: String,

        /// Update as JSON, e.g. '{"type":"toggleSubquery","value":"case:yes"}' (repeatable)
        #[arg(short, long = "update")]
        updates: Vec<String>,
    },

    /// Build the search a submission would run
    Submit {
        /// Current contents of the search input
        query: String,

        /// Update as JSON (repeatable)
        #[arg(short, long = "update")]
        updates: Vec<String>,

        /// Where the submission comes from
        #[arg(short, long, value_enum, default_value_t = SourceArg::Nav)]
        source: SourceArg,

        /// Search case-sensitively (overrides SIFT_CASE_SENSITIVE)
        #[arg(short, long)]
        case_sensitive: bool,

        /// Pattern type (overrides SIFT_PATTERN_TYPE)
        #[arg(short, long)]
        pattern_type: Option<PatternType>,

        /// Record the search in recent searches
        #[arg(long)]
        add_recent_search: bool,
    },

    /// Truncate a match group read from a JSON file
    LimitGroup {
        /// JSON file holding one match group
        input: PathBuf,

        /// Maximum number of matches to keep
        #[arg(short, long)]
        limit: usize,

        /// Trailing context lines (overrides SIFT_MATCH_CONTEXT_LINES)
        #[arg(short, long)]
        context: Option<usize>,
    },

    /// Build line chart content from insight series read from a JSON file
    Chart {
        /// JSON file holding the series
        input: PathBuf,

        /// JSON file holding series definitions
        #[arg(short, long)]
        definitions: Option<PathBuf>,

        /// Input is a list of series keyed by `seriesId` instead of `{"series": [...]}`
        #[arg(long)]
        indexed: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SourceArg {
    Home,
    Nav,
    Filter,
    Sidebar,
    Scope,
}

impl From<SourceArg> for SubmitSource {
    fn from(source: SourceArg) -> Self {
        match source {
            SourceArg::Home => SubmitSource::Home,
            SourceArg::Nav => SubmitSource::Nav,
            SourceArg::Filter => SubmitSource::Filter,
            SourceArg::Sidebar => SubmitSource::Sidebar,
            SourceArg::Scope => SubmitSource::Scope,
        }
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let _log_guard = init_logging();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing on stderr, or on a daily-rotated `LOG_FILE`.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional)
///   LOG_ANSI    - "true"/"false" override ANSI colors (off for files)
///   RUST_LOG    - standard env filter (default: [`DEFAULT_LOG_FILTER`])
fn init_logging() -> Option<WorkerGuard> {
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let log_file = std::env::var("LOG_FILE").ok();
    let ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1")
        .unwrap_or(log_file.is_none());

    let (writer, guard) = match log_file.as_deref().map(Path::new) {
        Some(path) => {
            let dir = path.parent().unwrap_or(Path::new("."));
            let name = path.file_name().unwrap_or("sift.log".as_ref());
            let (non_blocking, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stderr), None),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let layer = fmt::layer().with_writer(writer).with_ansi(ansi);
    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(layer.json()).init();
    } else {
        registry.with(layer).init();
    }

    debug!(json, log_file = log_file.as_deref(), "Logging initialized");
    guard
}

fn run(cli: Cli) -> Result<()> {
    let config = SearchConfig::from_env();

    match cli.command {
        Commands::Scan { query } => {
            let tokens = scan(&query)?;
            print_json(&tokens)?;
        }
        Commands::Apply { query, updates } => {
            let updates = parse_updates(&updates)?;
            let updated = update_query(&query, &updates);
            print_json(&serde_json::json!({ "query": updated }))?;
        }
        Commands::Submit {
            query,
            updates,
            source,
            case_sensitive,
            pattern_type,
            add_recent_search,
        } => {
            let updates = parse_updates(&updates)?;
            let config = match pattern_type {
                Some(pattern_type) => config.with_pattern_type(pattern_type),
                None => config,
            };

            let mut state = SearchQueryState::new(&config);
            state.set_query_state(QueryState::new(query));
            if case_sensitive {
                state.set_search_case_sensitivity(true);
            }

            let parameters = SubmitSearchParameters {
                source: source.into(),
                add_recent_search,
            };
            match state.submit_search(parameters, &updates) {
                Some(search) => {
                    let url = search.to_query_string();
                    print_json(&serde_json::json!({ "search": search, "url": url }))?;
                }
                None => {
                    info!("Query is empty after updates; nothing submitted");
                    print_json(&serde_json::json!({ "search": null }))?;
                }
            }
        }
        Commands::LimitGroup {
            input,
            limit,
            context,
        } => {
            let group: MatchGroup = read_json(&input)?;
            let limited = match context {
                Some(context) => limit_group_with_context(group, limit, context),
                None => limit_group_with_config(group, limit, &config),
            };
            print_json(&limited)?;
        }
        Commands::Chart {
            input,
            definitions,
            indexed,
        } => {
            let definitions: Vec<SeriesDefinition> = match definitions {
                Some(path) => read_json(&path)?,
                None => Vec::new(),
            };
            let content = if indexed {
                let series: Vec<IndexedSeriesData> = read_json(&input)?;
                create_line_chart_content_from_indexed_series(&series, &definitions)?
            } else {
                let data: InsightData = read_json(&input)?;
                create_line_chart_content(&data, &definitions)?
            };
            print_json(&content)?;
        }
    }

    Ok(())
}

fn parse_updates(raw: &[String]) -> Result<Vec<QueryUpdate>> {
    raw.iter()
        .map(|u| serde_json::from_str(u).with_context(|| format!("Invalid update '{}'", u)))
        .collect()
}

fn scan(query: &str) -> sift_core::Result<Vec<Token>> {
    Ok(scan_search_query(query)?)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> sift_core::Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    load_json(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
