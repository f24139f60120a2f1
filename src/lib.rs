//! gallery-select: build a selection over a lazily paginated remote collection.
//!
//! The selection core lives in [`selection`]; [`app`] wraps it in a
//! message-driven state machine that sequences page requests, and [`runtime`]
//! drives that machine from a single event loop.

pub mod app;
pub mod model;
pub mod render;
pub mod runtime;
pub mod select;
pub mod selection;
pub mod shell;
pub mod sources;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::runtime::EventLoop;
use crate::sources::{SourceConfig, open_source};

#[derive(Parser, Debug)]
#[command(
    name = "gsel",
    version,
    about = "Select records across pages of a large remote collection"
)]
pub struct Cli {
    /// API root serving `/artworks` pages
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Records per page
    #[arg(long, global = true, value_name = "N")]
    pub page_size: Option<u32>,

    /// Serve pages from a local JSON array instead of the network
    #[arg(long, global = true, value_name = "PATH")]
    pub fixture: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/gsel/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Machine-readable JSON output
    #[arg(long, global = true, alias = "robot")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Select the first N records overall and print their ids
    Select {
        /// How many records to select
        #[arg(long, short = 'n', value_name = "N")]
        first: usize,

        /// Stop after this many pages even if the target is not met
        #[arg(long, value_name = "K")]
        pages: Option<u32>,
    },
    /// Interactive page-by-page selection (reads commands from stdin)
    Shell,
}

/// Error surfaced to the user, with a process exit code.
#[derive(Debug, Clone)]
pub struct CliError {
    pub code: i32,
    pub kind: &'static str,
    pub message: String,
    pub hint: Option<String>,
    pub retryable: bool,
}

impl CliError {
    fn usage(message: String) -> Self {
        Self {
            code: 2,
            kind: "usage",
            message,
            hint: Some("run `gsel --help` for usage".into()),
            retryable: false,
        }
    }

    fn config(err: impl std::fmt::Display) -> Self {
        Self {
            code: 3,
            kind: "config",
            message: format!("configuration error: {err}"),
            hint: Some("check config.toml and GSEL_* environment variables".into()),
            retryable: false,
        }
    }

    fn unavailable(err: impl std::fmt::Display) -> Self {
        Self {
            code: 4,
            kind: "source",
            message: err.to_string(),
            hint: Some("check --base-url / --fixture and network access".into()),
            retryable: true,
        }
    }

    fn internal(err: anyhow::Error) -> Self {
        Self {
            code: 1,
            kind: "internal",
            message: format!("{err:#}"),
            hint: None,
            retryable: false,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.code,
                "kind": self.kind,
                "message": self.message,
                "hint": self.hint,
                "retryable": self.retryable,
            }
        })
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

#[derive(Debug)]
pub struct ParsedCli {
    pub cli: Cli,
}

/// Parse raw process arguments. `--help`/`--version` come back as a
/// `CliError` with code 0 carrying the text to print.
pub fn parse_cli(raw_args: Vec<String>) -> Result<ParsedCli, CliError> {
    match Cli::try_parse_from(raw_args) {
        Ok(cli) => Ok(ParsedCli { cli }),
        Err(err) => {
            use clap::error::ErrorKind;
            match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Err(CliError {
                    code: 0,
                    kind: "info",
                    message: err.to_string(),
                    hint: None,
                    retryable: false,
                }),
                _ => Err(CliError::usage(err.to_string())),
            }
        }
    }
}

/// Install the stderr tracing subscriber. Filter comes from `GSEL_LOG`,
/// then `RUST_LOG`, defaulting to `warn`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("GSEL_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Resolve configuration: file, then environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<SourceConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => SourceConfig::load_from(path),
        None => SourceConfig::load(),
    }
    .map_err(CliError::config)?;
    config.apply_env().map_err(CliError::config)?;

    if let Some(url) = &cli.base_url {
        config.base_url = url.clone();
    }
    if let Some(size) = cli.page_size {
        config.page_size = size;
    }
    if let Some(path) = &cli.fixture {
        config.fixture = Some(path.clone());
    }
    config.validate().map_err(CliError::config)?;
    Ok(config)
}

pub fn run_with_parsed(parsed: ParsedCli) -> Result<(), CliError> {
    let cli = parsed.cli;
    let config = resolve_config(&cli)?;
    let source = open_source(&config).map_err(CliError::unavailable)?;
    info!(source = %source.describe(), page_size = source.page_size(), "collection source ready");

    let event_loop = EventLoop::new(source);
    let mut app = event_loop.picker();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Select { first, pages } => {
            let report = select::select_first(&event_loop, &mut app, first, pages);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&report)
                        .map_err(|e| CliError::internal(anyhow::Error::new(e)))?
                );
            } else {
                let ids: Vec<String> = report.selected.iter().map(ToString::to_string).collect();
                println!("{}", ids.join(","));
                eprintln!(
                    "{} of {} selected across {} page(s)",
                    report.selected.len(),
                    report.target,
                    report.pages_fetched
                );
            }
            if let Some(err) = report.error {
                return Err(CliError::unavailable(err));
            }
            Ok(())
        }
        Commands::Shell => shell::run(&event_loop, &mut app, cli.json).map_err(CliError::internal),
    }
}
