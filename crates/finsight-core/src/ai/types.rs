//! AI backend request/response types
//!
//! These types are backend-agnostic and used across all AI implementations.
//! They mirror the JSON shapes the prompts ask the model to produce.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A transaction as extracted by the model, before an id is assigned
///
/// The extraction prompt instructs the model to normalize dates to
/// YYYY-MM-DD and keep the amount sign consistent with the type; a date that
/// does not parse fails the whole extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: crate::models::TransactionType,
}

/// The expense subset sent to the categorization model
///
/// No id is included, to keep the prompt small; results are matched back by
/// (description, amount) with a positional fallback.
#[derive(Debug, Clone, Serialize)]
pub struct ExpenseInput {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
}

/// One categorized expense as echoed back by the model
///
/// The category is kept as a free string here; unknown labels fold into
/// `Category::Others` during reconciliation. The echoed date is not trusted
/// for matching.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorizedExpense {
    #[serde(default)]
    pub date: Option<String>,
    pub description: String,
    pub amount: f64,
    pub category: String,
}

/// Wire envelope for the extraction response
#[derive(Debug, Deserialize)]
pub struct ExtractionResponse {
    pub transactions: Vec<RawTransaction>,
}

/// Wire envelope for the categorization response
#[derive(Debug, Deserialize)]
pub struct CategorizationResponse {
    pub categorized_transactions: Vec<CategorizedExpense>,
}
