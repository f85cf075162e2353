//! FinSight Core Library
//!
//! Shared functionality for the FinSight statement dashboard:
//! - Domain models (transactions, categories, summaries)
//! - Statement text extraction (PDF or plain text)
//! - Pluggable AI backends (Ollama, mock) for the two model calls
//! - The extract -> categorize -> merge pipeline
//! - In-memory transaction store with explicit mutation entry points
//! - Dashboard aggregation (KPI totals, per-category spending)
//! - JSON export/import with schema validation
//! - Prompt library for customizable model prompts

pub mod ai;
pub mod data;
pub mod error;
pub mod export;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod prompts;
pub mod store;
pub mod summary;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, CategorizedExpense, ExpenseInput, MockBackend, OllamaBackend, RawTransaction};
pub use data::sample_transactions;
pub use error::{Error, Result};
pub use export::{export_transactions, import_transactions};
pub use extract::extract_statement_text;
pub use models::{
    CategorizedTransaction, Category, CategorySpending, Summary, Transaction, TransactionType,
};
pub use pipeline::Pipeline;
pub use prompts::{Prompt, PromptId, PromptInfo, PromptLibrary};
pub use store::TransactionStore;
pub use summary::{category_spending, summarize};
