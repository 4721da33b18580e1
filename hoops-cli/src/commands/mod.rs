//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod entity;

pub use entity::EntityCommands;

use anyhow::Result;
use clap::Subcommand;
use hoops_client::ApiClient;
use hoops_core::domain::{Coach, Player, Position, Team};
use tokio_util::sync::CancellationToken;

use crate::config::Config;

/// Top-level CLI commands, one per entity collection
#[derive(Subcommand)]
pub enum Commands {
    /// Team management
    Teams {
        #[command(subcommand)]
        command: EntityCommands,
    },
    /// Player management
    Players {
        #[command(subcommand)]
        command: EntityCommands,
    },
    /// Coach management
    Coaches {
        #[command(subcommand)]
        command: EntityCommands,
    },
    /// Position management
    Positions {
        #[command(subcommand)]
        command: EntityCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the generic entity handler. Ctrl-C cancels the
/// in-flight request.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = ApiClient::new(&config.api_url);

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    match command {
        Commands::Teams { command } => entity::handle::<Team>(command, &client, &cancel).await,
        Commands::Players { command } => entity::handle::<Player>(command, &client, &cancel).await,
        Commands::Coaches { command } => entity::handle::<Coach>(command, &client, &cancel).await,
        Commands::Positions { command } => {
            entity::handle::<Position>(command, &client, &cancel).await
        }
    }
}
