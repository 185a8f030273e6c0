//! Command-line surface.

use clap::{Parser, Subcommand};
use compass_common::Mode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "compassctl")]
#[command(about = "Moral compass plotter - judge deeds and motives with a language model", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive plot (default)
    Tui,

    /// Judge a single scenario and print its coordinates
    Judge {
        /// The deed being judged
        #[arg(long)]
        action: String,

        /// The stated motive behind it
        #[arg(long)]
        intent: String,

        /// Judging frame: duty or outcome
        #[arg(long, default_value = "duty")]
        mode: Mode,

        /// Write the judged point to a JSON file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the effective configuration
    Config,
}
