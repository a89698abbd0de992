//! Connect Four client - unified CLI
//!
//! Interactive terminal UI plus one-shot board commands.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command, ConnectionArgs, DimensionArgs};
use connect_four_client::{
    ClientConfig, HttpBoardClient, IntentOutcome, NotificationKind, SessionController,
};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            connection,
            dimensions,
        } => {
            let config = load_config(&connection, Some(dimensions))?;
            tui::run_tui(config).await
        }
        Command::Show { connection } => {
            initialize_cli_tracing();
            let config = load_config(&connection, None)?;
            run_show(config).await
        }
        Command::NewGame {
            connection,
            dimensions,
        } => {
            initialize_cli_tracing();
            let config = load_config(&connection, Some(dimensions))?;
            run_new_game(config).await
        }
    }
}

/// Resolves configuration: file (or defaults), then environment, then flags.
fn load_config(
    connection: &ConnectionArgs,
    dimensions: Option<DimensionArgs>,
) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_or_default(&connection.config)?.with_env_overrides();
    if let Some(url) = &connection.server_url {
        config = config.with_server_url(url.clone());
    }
    if let Some(dims) = dimensions {
        config = config.with_dimensions(dims.height, dims.width, dims.win);
    }
    Ok(config)
}

/// Builds a controller talking to the configured authority.
fn connect(config: &ClientConfig) -> Result<SessionController<HttpBoardClient>> {
    let client = HttpBoardClient::new(config.server_url(), config.request_timeout())?;
    Ok(SessionController::new(client, config.notifications()))
}

/// Prints the current board once.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn run_show(config: ClientConfig) -> Result<()> {
    let mut controller = connect(&config)?;
    let outcome = controller.load_board().await;
    finish_one_shot(&controller, outcome)
}

/// Creates a board with the configured dimensions and prints it.
#[instrument(skip_all, fields(server_url = %config.server_url()))]
async fn run_new_game(config: ClientConfig) -> Result<()> {
    let mut controller = connect(&config)?;
    let outcome = controller
        .new_game(
            *config.default_height(),
            *config.default_width(),
            *config.default_win(),
        )
        .await;
    finish_one_shot(&controller, outcome)
}

fn finish_one_shot(
    controller: &SessionController<HttpBoardClient>,
    outcome: IntentOutcome,
) -> Result<()> {
    info!(?outcome, "Command finished");
    match outcome {
        IntentOutcome::Applied(_) => {
            println!("{}", controller.render());
            Ok(())
        }
        _ => {
            let message = controller
                .notifications()
                .active(NotificationKind::Error)
                .map(|n| n.message().clone())
                .unwrap_or_else(|| format!("Command failed: {:?}", outcome));
            anyhow::bail!(message)
        }
    }
}

fn initialize_cli_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
