//! CLI command tests
//!
//! Commands that need a model run against the mock backend directly, so no
//! environment mutation is involved.

use std::io::Write;

use clap::Parser;

use finsight_core::ai::AIClient;
use finsight_core::{sample_transactions, Pipeline};

use crate::cli::{Cli, Commands};
use crate::commands;

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::parse_from(["finsight", "serve"]);
    match cli.command {
        Commands::Serve { port, host, static_dir, allowed_origins } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(static_dir.is_none());
            assert!(allowed_origins.is_empty());
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_parse_serve_with_origins() {
    let cli = Cli::parse_from([
        "finsight",
        "serve",
        "--allow-origin",
        "http://localhost:5173",
        "--allow-origin",
        "https://finsight.example",
    ]);
    match cli.command {
        Commands::Serve { allowed_origins, .. } => {
            assert_eq!(allowed_origins.len(), 2);
        }
        _ => panic!("expected serve command"),
    }
}

#[test]
fn test_parse_categorize_requires_file() {
    assert!(Cli::try_parse_from(["finsight", "categorize"]).is_err());

    let cli = Cli::parse_from(["finsight", "categorize", "--file", "stmt.pdf", "--json"]);
    match cli.command {
        Commands::Categorize { file, json } => {
            assert_eq!(file.to_str(), Some("stmt.pdf"));
            assert!(json);
        }
        _ => panic!("expected categorize command"),
    }
}

// ========== Command Tests ==========

#[tokio::test]
async fn test_categorize_missing_file_fails() {
    let result = commands::cmd_categorize(std::path::Path::new("/no/such/file.pdf"), false).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_categorize_statement_file_with_mock_backend() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "2024-07-15|Salary Deposit|5000").unwrap();
    writeln!(file, "2024-07-20|Trader Joe's|-120.50").unwrap();

    // Run the same pipeline cmd_categorize drives, against the mock backend
    let bytes = std::fs::read(file.path()).unwrap();
    let pipeline = Pipeline::new(AIClient::mock());
    let categorized = pipeline.process_document(&bytes).await.unwrap();

    assert_eq!(categorized.len(), 2);
    assert_eq!(categorized[0].description, "Trader Joe's");
}

#[tokio::test]
async fn test_sample_pipeline_with_mock_backend() {
    let pipeline = Pipeline::new(AIClient::mock());
    let categorized = pipeline.categorize(sample_transactions()).await.unwrap();
    assert_eq!(categorized.len(), 20);
}

// ========== Prompt Command Tests ==========

#[test]
fn test_cmd_prompts_list() {
    assert!(commands::cmd_prompts_list().is_ok());
}

#[test]
fn test_cmd_prompts_show_known_id() {
    assert!(commands::cmd_prompts_show("extract_transactions").is_ok());
    assert!(commands::cmd_prompts_show("categorize_transactions").is_ok());
}

#[test]
fn test_cmd_prompts_show_unknown_id() {
    assert!(commands::cmd_prompts_show("nonsense").is_err());
}
