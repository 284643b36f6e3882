//! orgdash CLI: organization CI/CD status dashboards from the GitHub API.
//!
//! Regenerates a full status README or refreshes the "Core Repositories"
//! section of an organization profile in place.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
