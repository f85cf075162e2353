//! Ollama backend implementation
//!
//! HTTP client for the Ollama API. Uses the prompt library for customizable
//! extraction/categorization prompts and parses JSON payloads out of the
//! free-text model responses.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::prompts::{PromptId, PromptLibrary};

use super::parsing::{parse_categorization_response, parse_extraction_response};
use super::types::{CategorizedExpense, ExpenseInput, RawTransaction};
use super::AIBackend;

/// Ollama backend
///
/// # Configuration
///
/// - `OLLAMA_HOST`: Ollama server URL (required)
/// - `OLLAMA_MODEL`: model name (default: llama3.2)
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
    prompts: Arc<RwLock<PromptLibrary>>,
}

impl Clone for OllamaBackend {
    fn clone(&self) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            prompts: self.prompts.clone(),
        }
    }
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            prompts: Arc::new(RwLock::new(PromptLibrary::new())),
        }
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            prompts: self.prompts.clone(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string());
        Some(Self::new(&host, &model))
    }

    fn render_prompt(&self, id: PromptId, vars: &HashMap<&str, &str>) -> Result<String> {
        let mut prompts = self
            .prompts
            .write()
            .map_err(|_| Error::InvalidData("Failed to acquire prompt library lock".into()))?;
        let template = prompts.get(id)?;
        Ok(template.render_full(vars))
    }

    async fn generate(&self, prompt: String) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt,
            stream: false,
        };

        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let ollama_response: OllamaResponse = response.json().await?;
        debug!("Ollama response: {}", ollama_response.response);

        Ok(ollama_response.response)
    }
}

/// Request to Ollama API
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
}

/// Response from Ollama API
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Render the expense list the way the categorization prompt expects it
pub(super) fn format_expense_lines(expenses: &[ExpenseInput]) -> String {
    expenses
        .iter()
        .map(|e| {
            format!(
                "- Date: {}, Amount: {}, Description: {}",
                e.date, e.amount, e.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl AIBackend for OllamaBackend {
    async fn extract_transactions(&self, statement_text: &str) -> Result<Vec<RawTransaction>> {
        let prompt = {
            let mut vars = HashMap::new();
            vars.insert("statement_text", statement_text);
            self.render_prompt(PromptId::ExtractTransactions, &vars)?
        };

        let response = self.generate(prompt).await?;
        parse_extraction_response(&response)
    }

    async fn categorize_expenses(
        &self,
        expenses: &[ExpenseInput],
    ) -> Result<Vec<CategorizedExpense>> {
        let lines = format_expense_lines(expenses);
        let prompt = {
            let mut vars = HashMap::new();
            vars.insert("transactions", lines.as_str());
            self.render_prompt(PromptId::CategorizeTransactions, &vars)?
        };

        let response = self.generate(prompt).await?;
        parse_categorization_response(&response)
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}
