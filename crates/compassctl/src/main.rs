//! Compass Control - moral compass plotter
//!
//! Judges a deed and its motive with a generative model and plots the pair
//! on a terminal scatter chart.

use anyhow::Result;
use clap::Parser;
use compassctl::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    compassctl::run(cli).await
}
