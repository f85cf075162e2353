//! FinSight CLI - Statement-to-dashboard categorizer
//!
//! Usage:
//!   finsight serve --port 3000          Start web server
//!   finsight categorize --file stmt.pdf Run the pipeline on a statement
//!   finsight sample                     Categorize the built-in sample data
//!   finsight prompts list               Inspect model prompts

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            allowed_origins,
        } => commands::cmd_serve(&host, port, static_dir.as_deref(), allowed_origins).await,
        Commands::Categorize { file, json } => commands::cmd_categorize(&file, json).await,
        Commands::Sample { json } => commands::cmd_sample(json).await,
        Commands::Prompts { command } => match command {
            PromptCommands::List => commands::cmd_prompts_list(),
            PromptCommands::Show { id } => commands::cmd_prompts_show(&id),
        },
    }
}
