//! Tiered context - memory discovery and query keywords for coding agents.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tiered_context::config::{ConfigError, ConfigLoader, MemoryConfig};
use tiered_context::display;
use tiered_context::hooks::{ContextHookHandler, HookError, HookInput};
use tiered_context::keywords::KeywordExtractor;
use tiered_context::memory::{MemoryManager, Tier};

#[derive(Parser)]
#[command(
    name = "tiered-context",
    about = "Tiered memory discovery and query keywords for coding agents",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file (defaults to .tiered-context.toml, then the user config dir).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Workspace directory; may be repeated. Defaults to the current directory.
    #[arg(short, long = "workspace", global = true)]
    workspaces: Vec<PathBuf>,

    /// Treat the workspace as trusted regardless of configuration.
    #[arg(long, global = true)]
    trusted: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load all memory tiers and print them.
    Refresh {
        /// Print JSON instead of formatted text.
        #[arg(long)]
        json: bool,
        /// List loaded files with their tiers.
        #[arg(long)]
        records: bool,
    },
    /// Refresh, then discover memory near each accessed path in order.
    Discover {
        /// Accessed file paths.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },
    /// Extract ranked search keywords from a query.
    Keywords {
        /// The query text.
        #[arg(required = true)]
        query: Vec<String>,
        /// Print JSON instead of formatted text.
        #[arg(long)]
        json: bool,
        /// Do not truncate long term lists.
        #[arg(long)]
        raw: bool,
    },
    /// Handle a Claude Code hook event read from stdin.
    Hook,
}

/// Errors that end a command.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli, fallback_dir: Option<PathBuf>) -> Result<MemoryConfig, CliError> {
    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_path(path.clone()),
        None => ConfigLoader::new(),
    };
    let mut config = loader.load()?;

    if !cli.workspaces.is_empty() {
        config.workspace.directories.clone_from(&cli.workspaces);
    }
    if config.workspace.directories.is_empty() {
        let dir = match fallback_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        config.workspace.directories.push(dir);
    }
    if cli.trusted {
        config.workspace.trusted = true;
    }
    Ok(config)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        Commands::Refresh { json, records } => {
            let config = load_config(&cli, None)?;
            let manager = MemoryManager::new(&config);
            let summary = manager.refresh().await;

            if *json {
                return print_json(&serde_json::json!({
                    "summary": summary,
                    "records": manager.file_records().await,
                    "loaded": manager.loaded_paths().await,
                    "tiers": manager.tier_buffers().await,
                }));
            }
            display::print_refresh_summary(&summary);
            if *records {
                display::print_records(&manager.file_records().await);
            }
            let buffers = manager.tier_buffers().await;
            for tier in Tier::ALL {
                display::print_tier(tier, buffers.get(tier));
            }
            Ok(())
        }
        Commands::Discover { paths, json } => {
            let config = load_config(&cli, None)?;
            let manager = MemoryManager::new(&config);
            if !manager.is_trusted() {
                tracing::warn!("Workspace is untrusted, only global and extension memory load");
            }
            manager.refresh().await;

            let mut results = Vec::new();
            for path in paths {
                let discovered = manager.discover_context_in_workspace(path).await;
                if !*json {
                    display::print_discovered(path, &discovered);
                }
                results.push(serde_json::json!({ "path": path, "discovered": discovered }));
            }
            if *json {
                print_json(&serde_json::json!({
                    "results": results,
                    "loaded": manager.loaded_paths().await,
                }))?;
            }
            Ok(())
        }
        Commands::Keywords { query, json, raw } => {
            let extracted = KeywordExtractor::new().extract(&query.join(" "));
            if *json {
                return print_json(&extracted);
            }
            display::print_keywords(&extracted, *raw);
            Ok(())
        }
        Commands::Hook => {
            let mut input = String::new();
            tokio::io::stdin().read_to_string(&mut input).await?;
            let hook_input: HookInput = serde_json::from_str(&input).map_err(HookError::from)?;

            let config = load_config(&cli, hook_input.cwd.clone().map(PathBuf::from))?;
            let manager = Arc::new(MemoryManager::new(&config));
            manager.refresh().await;

            let handler = ContextHookHandler::new(manager);
            if let Some(response) = handler.handle(&hook_input).await? {
                print_json(&response)?;
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display::print_error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
