//! Pluggable AI backend abstraction
//!
//! This module provides a backend-agnostic interface for the two model calls
//! the pipeline makes: transaction extraction and expense categorization.
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the interface for all AI operations
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OllamaBackend`, `MockBackend`
//!
//! # Usage
//!
//! ```rust,ignore
//! // Create from environment
//! let ai = AIClient::from_env();
//!
//! // Extract transactions from statement text
//! if let Some(ref client) = ai {
//!     let raw = client.extract_transactions(&text).await?;
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (ollama, mock). Default: ollama
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)
//! - `OLLAMA_MODEL`: Default model name (default: llama3.2)

mod mock;
mod ollama;
pub mod parsing;
pub mod types;

pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use types::{CategorizedExpense, ExpenseInput, RawTransaction};

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Extract raw transactions from statement text
    ///
    /// An empty result is a valid response at this layer; the pipeline is
    /// responsible for treating it as a failure.
    async fn extract_transactions(&self, statement_text: &str) -> Result<Vec<RawTransaction>>;

    /// Categorize a batch of expenses
    ///
    /// The returned list is expected to have the same cardinality and order
    /// as the input, but that contract is only prompt-enforced; callers must
    /// reconcile defensively.
    async fn categorize_expenses(
        &self,
        expenses: &[ExpenseInput],
    ) -> Result<Vec<CategorizedExpense>>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
/// All variants implement the same AIBackend operations.
#[derive(Clone)]
pub enum AIClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `ollama` (default): Uses OLLAMA_HOST and OLLAMA_MODEL
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").unwrap_or_else(|_| "ollama".to_string());

        match backend.to_lowercase().as_str() {
            "ollama" => OllamaBackend::from_env().map(AIClient::Ollama),
            "mock" => Some(AIClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, falling back to ollama");
                OllamaBackend::from_env().map(AIClient::Ollama)
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AIClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            AIClient::Ollama(b) => AIClient::Ollama(b.with_model(model)),
            AIClient::Mock(b) => AIClient::Mock(b.with_model(model)),
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn extract_transactions(&self, statement_text: &str) -> Result<Vec<RawTransaction>> {
        match self {
            AIClient::Ollama(b) => b.extract_transactions(statement_text).await,
            AIClient::Mock(b) => b.extract_transactions(statement_text).await,
        }
    }

    async fn categorize_expenses(
        &self,
        expenses: &[ExpenseInput],
    ) -> Result<Vec<CategorizedExpense>> {
        match self {
            AIClient::Ollama(b) => b.categorize_expenses(expenses).await,
            AIClient::Mock(b) => b.categorize_expenses(expenses).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::Ollama(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::Ollama(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
