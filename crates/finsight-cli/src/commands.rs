//! Command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};

use finsight_core::ai::AIClient;
use finsight_core::models::CategorizedTransaction;
use finsight_core::prompts::{PromptId, PromptLibrary};
use finsight_core::summary::summarize;
use finsight_core::{sample_transactions, Pipeline};
use finsight_server::ServerConfig;

/// Start the web server
pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    allowed_origins: Vec<String>,
) -> Result<()> {
    let config = ServerConfig { allowed_origins };
    finsight_server::serve(host, port, static_dir, config).await
}

/// Run the full pipeline on a local statement file
pub async fn cmd_categorize(file: &Path, json: bool) -> Result<()> {
    let bytes = std::fs::read(file)
        .with_context(|| format!("Failed to read statement file {}", file.display()))?;

    let pipeline = Pipeline::new(require_ai()?);
    let categorized = pipeline.process_document(&bytes).await?;

    print_result(&categorized, json)
}

/// Categorize the built-in sample data
pub async fn cmd_sample(json: bool) -> Result<()> {
    let pipeline = Pipeline::new(require_ai()?);
    let categorized = pipeline.categorize(sample_transactions()).await?;

    print_result(&categorized, json)
}

/// List prompts and their override status
pub fn cmd_prompts_list() -> Result<()> {
    let mut library = PromptLibrary::new();

    println!("{:<28} {:>7}  {:<22} {}", "ID", "VERSION", "TASK", "SOURCE");
    for info in library.list() {
        let source = if info.has_override {
            format!(
                "override ({})",
                info.override_path
                    .as_deref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default()
            )
        } else {
            "embedded".to_string()
        };
        println!(
            "{:<28} {:>7}  {:<22} {}",
            info.id, info.version, info.task_type, source
        );
    }

    if let Some(dir) = library.override_dir() {
        println!("\nOverride directory: {}", dir.display());
    }

    Ok(())
}

/// Show a prompt's content
pub fn cmd_prompts_show(id: &str) -> Result<()> {
    let prompt_id: PromptId = id
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let mut library = PromptLibrary::new();
    let prompt = library.get(prompt_id)?;

    println!("{}", prompt.content);
    Ok(())
}

fn require_ai() -> Result<AIClient> {
    match AIClient::from_env() {
        Some(client) => Ok(client),
        None => bail!(
            "No AI backend configured. Set OLLAMA_HOST (and optionally OLLAMA_MODEL), \
             or AI_BACKEND=mock for deterministic offline output."
        ),
    }
}

fn print_result(categorized: &[CategorizedTransaction], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(categorized)?);
        return Ok(());
    }

    println!(
        "{:<12} {:<34} {:>12}  {:<8} {}",
        "DATE", "DESCRIPTION", "AMOUNT", "TYPE", "CATEGORY"
    );
    for tx in categorized {
        println!(
            "{:<12} {:<34} {:>12.2}  {:<8} {}",
            tx.date, tx.description, tx.amount, tx.transaction_type, tx.category
        );
    }

    let summary = summarize(categorized);
    println!(
        "\n{} transactions | income {:.2} | expenses {:.2} | net {:.2}",
        categorized.len(),
        summary.income,
        summary.expenses,
        summary.net
    );

    Ok(())
}
