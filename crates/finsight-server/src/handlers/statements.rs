//! Statement ingestion handlers
//!
//! Two upload shapes (multipart file and base64 JSON) plus the sample-data
//! path. A successful run replaces the whole store; any stage failure leaves
//! the store untouched and returns one error message.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::Engine;
use serde::Deserialize;
use tracing::info;

use finsight_core::data::sample_transactions;
use finsight_core::models::CategorizedTransaction;

use crate::{core_error, AppError, AppState, MAX_UPLOAD_SIZE};

use super::transactions::TransactionListResponse;

/// JSON upload payload: raw statement text or a base64-encoded PDF
#[derive(Debug, Deserialize)]
pub struct StatementJsonUpload {
    pub text: Option<String>,
    pub pdf_base64: Option<String>,
}

/// POST /api/statements - multipart statement upload (PDF or text file)
pub async fn upload_statement(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<TransactionListResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Invalid multipart body: {}", e)))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::bad_request(&format!("Failed to read upload: {}", e)))?;
            file_bytes = Some(bytes.to_vec());
            break;
        }
    }

    let bytes = file_bytes
        .ok_or_else(|| AppError::bad_request("Missing 'file' field in multipart upload"))?;

    if bytes.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::bad_request("Uploaded file is too large (10 MB max)"));
    }

    run_pipeline_and_store(&state, &bytes).await
}

/// POST /api/statements/json - base64/raw-text statement upload
pub async fn upload_statement_json(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<StatementJsonUpload>,
) -> Result<Json<TransactionListResponse>, AppError> {
    let bytes = match (payload.text, payload.pdf_base64) {
        (Some(text), _) => text.into_bytes(),
        (None, Some(encoded)) => base64::engine::general_purpose::STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| AppError::bad_request(&format!("Invalid base64 PDF payload: {}", e)))?,
        (None, None) => {
            return Err(AppError::bad_request(
                "Provide either 'text' or 'pdf_base64'",
            ))
        }
    };

    if bytes.len() > MAX_UPLOAD_SIZE {
        return Err(AppError::bad_request("Uploaded file is too large (10 MB max)"));
    }

    run_pipeline_and_store(&state, &bytes).await
}

/// POST /api/sample - load the sample data set through the categorizer
///
/// Extraction is skipped; only the categorization stage runs, exactly like a
/// real upload from the merge step onward.
pub async fn load_sample(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TransactionListResponse>, AppError> {
    let pipeline = state.pipeline()?;
    let categorized = pipeline
        .categorize(sample_transactions())
        .await
        .map_err(core_error)?;

    info!(count = categorized.len(), "Loaded sample transactions");
    Ok(replace_store(&state, categorized))
}

async fn run_pipeline_and_store(
    state: &Arc<AppState>,
    bytes: &[u8],
) -> Result<Json<TransactionListResponse>, AppError> {
    let pipeline = state.pipeline()?;
    let categorized = pipeline.process_document(bytes).await.map_err(core_error)?;

    info!(count = categorized.len(), "Statement processed");
    Ok(replace_store(state, categorized))
}

fn replace_store(
    state: &AppState,
    categorized: Vec<CategorizedTransaction>,
) -> Json<TransactionListResponse> {
    state.store.replace_all(categorized.clone());
    Json(TransactionListResponse {
        total: categorized.len(),
        transactions: categorized,
    })
}
