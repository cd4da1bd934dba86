//! MentorScout CLI — find vetted startup mentors for a field of interest.
//!
//! Fans out across search query variants, extracts candidate profiles from
//! the results, and ranks them by semantic relevance, experience, and
//! sentiment. Also analyzes the competitive landscape around a product idea.

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
