//! Compass Control library.
//!
//! The binary is a thin wrapper around [`run`]; everything else lives here
//! so the integration tests can drive the client and stores directly.

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod points;
pub mod snapshot;
pub mod tui;

use anyhow::Result;
use cli::{Cli, Commands};

/// Dispatch the parsed command line. No subcommand means the TUI.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None | Some(Commands::Tui) => {
            logging::init_for_tui();
            tui::run().await
        }
        Some(Commands::Judge {
            action,
            intent,
            mode,
            out,
        }) => {
            logging::init_for_cli();
            commands::judge(&action, &intent, mode, out.as_deref()).await
        }
        Some(Commands::Config) => {
            logging::init_for_cli();
            commands::show_config()
        }
    }
}
