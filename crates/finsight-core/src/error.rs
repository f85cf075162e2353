//! Error types for FinSight

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Could not read any text from the uploaded document: {0}")]
    Extraction(String),

    #[error("Could not extract any transactions from the statement")]
    NoTransactions,

    #[error("Categorization failed: {0}")]
    Categorization(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
