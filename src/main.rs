mod auth;
mod cli;
mod dora;
mod error;
mod insights;
mod models;
mod output;
mod providers;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a local .env file; its absence is not an error
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        debug!("No .env file loaded: {e}");
    }

    let cli = Cli::parse();
    info!("Starting DoraLens - DORA Metrics Tool");
    cli.execute().await?;

    Ok(())
}
