use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

mod bootstrap;
mod config;
mod freshness;
mod github;
mod host;
mod loader;
mod ports;

use bootstrap::{InitOutcome, Integration};
use config::Config;
use freshness::FreshnessReporter;
use github::{DataStore, GitHubClient};
use host::{ConsoleDisplay, ConsoleNotifier, SnapshotRenderer};
use loader::{DataLoader, LoadOutcome};
use ports::SharedState;

/// Load Rotogrinders projections from a GitHub data repository
#[derive(Parser, Debug)]
#[command(name = "rotogrinders-sync", version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Sport whose projections are loaded (nba, nfl, nhl)
    #[arg(long, env = "SPORT", default_value = "nba", global = true)]
    sport: String,

    /// Write the loaded sources as JSON to this file after each render
    #[arg(long, env = "OUTPUT_PATH", global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum Command {
    /// Load data and show the last update time (default)
    Init,
    /// Load the current sport's projections
    Load,
    /// Announce a manual refresh, then load
    Refresh,
    /// Print how long ago the data directory last changed
    LastUpdate,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    cli.config.validate()?;
    let command = cli.command.unwrap_or(Command::Init);

    // Every path except `init` reaches the network directly, so the
    // placeholder gate is enforced here as well
    if !matches!(command, Command::Init) && !cli.config.is_configured() {
        anyhow::bail!(
            "GitHub integration not configured: set GITHUB_USERNAME, GITHUB_REPO and GITHUB_TOKEN"
        );
    }

    let state = SharedState::new(&cli.sport);
    let store: Arc<dyn DataStore> = Arc::new(GitHubClient::new(&cli.config)?);
    let loader = DataLoader::new(
        store.clone(),
        Arc::new(SnapshotRenderer::new(state.clone(), cli.output.clone())),
        Arc::new(ConsoleNotifier),
    );
    let reporter = FreshnessReporter::new(store, Arc::new(ConsoleDisplay));
    let integration = Integration::new(cli.config, loader, reporter);

    match command {
        Command::Init => match integration.initialize(&state).await {
            InitOutcome::NotConfigured => {}
            InitOutcome::Initialized { load, last_update } => {
                report_load(&load);
                if last_update.is_none() {
                    info!("Last update time unavailable");
                }
            }
        },
        Command::Load => report_load(&integration.loader().auto_load(&state).await),
        Command::Refresh => report_load(&integration.loader().refresh(&state).await),
        Command::LastUpdate => match integration.reporter().show_last_update_time().await {
            Some(_) => {}
            None => warn!("No commit information for the data directory"),
        },
    }

    Ok(())
}

fn report_load(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Loaded { players } => info!("Load complete: {} players", players),
        LoadOutcome::Skipped => info!("Load skipped"),
        LoadOutcome::Failed => warn!("Load failed"),
    }
}
