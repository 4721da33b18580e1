//! Hoops CLI
//!
//! Command-line interface for the remote basketball API.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;

#[derive(Parser)]
#[command(name = "hoops")]
#[command(about = "Basketball league records CLI", long_about = None)]
struct Cli {
    /// Remote API base URL
    #[arg(long, env = "HOOPS_API_URL", default_value = "http://localhost:5000/api")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
    };

    handle_command(cli.command, &config).await
}
