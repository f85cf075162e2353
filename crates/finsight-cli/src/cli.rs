//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// FinSight - Categorize bank statements with a local model
#[derive(Parser)]
#[command(name = "finsight")]
#[command(about = "Statement-to-dashboard categorizer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory with the built dashboard frontend to serve
        #[arg(long)]
        static_dir: Option<String>,

        /// Additional allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },

    /// Run the pipeline on a statement file (PDF or text)
    Categorize {
        /// Statement file to process
        #[arg(short, long)]
        file: PathBuf,

        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Categorize the built-in sample data
    Sample {
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Inspect model prompts
    Prompts {
        #[command(subcommand)]
        command: PromptCommands,
    },
}

#[derive(Subcommand)]
pub enum PromptCommands {
    /// List prompts and their override status
    List,
    /// Show a prompt's content
    Show {
        /// Prompt id (extract_transactions, categorize_transactions)
        id: String,
    },
}
