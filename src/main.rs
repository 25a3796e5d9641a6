mod cmd;
mod config;
mod context;
mod domain;
mod error;
mod infra;
mod services;
mod workflow;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cmd::config::{self as config_cmd, ConfigArgs};
use crate::cmd::directories;
use crate::cmd::label::{self, LabelCommandArgs};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::github::GitHubClient;

#[derive(Parser)]
#[command(
    name = "dirlabel",
    author,
    version,
    about = "Label pull requests by the top-level directories they touch"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label the triggering pull request (GitHub Actions step).
    Label(LabelArgs),
    /// Print the top-level directories for the given paths, or stdin lines.
    Directories(DirectoriesArgs),
    /// Inspect the resolved configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
struct LabelArgs {
    /// Label this pull request instead of reading the event payload.
    #[arg(short, long)]
    pull_request: Option<u64>,
    /// Repository as owner/name; defaults to GITHUB_REPOSITORY.
    #[arg(short, long)]
    repository: Option<String>,
    /// Event payload file; defaults to GITHUB_EVENT_PATH.
    #[arg(long)]
    event_path: Option<PathBuf>,
}

#[derive(Args)]
struct DirectoriesArgs {
    /// Repository-relative file paths.
    paths: Vec<String>,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(err) = run().await {
        eprintln!("::error::Action failed: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    match cli.command {
        Commands::Config(args) => {
            for line in config_cmd::run(args.command, &config) {
                println!("{line}");
            }
            Ok(())
        }
        Commands::Directories(args) => {
            for dir in directories::run(args.paths)?.iter() {
                println!("{dir}");
            }
            Ok(())
        }
        Commands::Label(args) => run_label(config, args).await,
    }
}

async fn run_label(config: AppConfig, args: LabelArgs) -> AppResult<()> {
    let host = Arc::new(GitHubClient::new(
        config.api_url.clone(),
        config.token.clone(),
    ));
    let context = AppContext::new(config, host);

    let outcome = label::run(
        &context,
        LabelCommandArgs {
            pull_request: args.pull_request,
            repository: args.repository,
            event_path: args.event_path,
        },
    )
    .await?;

    match outcome {
        Some(outcome) if outcome.labels_added.is_empty() => {
            info!("Done; {} directories, nothing new", outcome.directories.len());
        }
        Some(outcome) => {
            info!(
                "Done; labeled with {} of {} directories",
                outcome.labels_added.len(),
                outcome.directories.len()
            );
        }
        None => {}
    }

    Ok(())
}
