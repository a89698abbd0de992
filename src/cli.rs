//! Command-line interface for connect_four_client.

use clap::{Args, Parser, Subcommand};

/// Connect Four client - play against a remote board authority
#[derive(Parser, Debug)]
#[command(name = "connect_four_client")]
#[command(about = "Terminal client for a remote Connect Four board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Path to the client config file (defaults are used if it doesn't exist)
    #[arg(short, long, default_value = "connect_four.toml")]
    pub config: std::path::PathBuf,

    /// Board server URL, overriding config and environment
    #[arg(long)]
    pub server_url: Option<String>,
}

/// Board dimensions given on the command line.
#[derive(Args, Debug, Clone, Copy)]
pub struct DimensionArgs {
    /// Number of rows
    #[arg(long)]
    pub height: Option<usize>,

    /// Number of columns
    #[arg(long)]
    pub width: Option<usize>,

    /// Tokens in a row needed to win
    #[arg(long)]
    pub win: Option<usize>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the interactive terminal UI
    Play {
        /// Connection settings
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Dimensions used when starting a new game
        #[command(flatten)]
        dimensions: DimensionArgs,
    },

    /// Print the current board once and exit
    Show {
        /// Connection settings
        #[command(flatten)]
        connection: ConnectionArgs,
    },

    /// Create a new board, print it, and exit
    NewGame {
        /// Connection settings
        #[command(flatten)]
        connection: ConnectionArgs,

        /// Board dimensions
        #[command(flatten)]
        dimensions: DimensionArgs,
    },
}
