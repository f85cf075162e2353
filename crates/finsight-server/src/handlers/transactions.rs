//! Transaction collection handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use finsight_core::export;
use finsight_core::models::{Category, CategorizedTransaction};

use crate::{core_error, AppError, AppState};

#[derive(Serialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<CategorizedTransaction>,
    pub total: usize,
}

/// GET /api/transactions - current transaction list
pub async fn list_transactions(State(state): State<Arc<AppState>>) -> Json<TransactionListResponse> {
    let transactions = state.store.snapshot();
    Json(TransactionListResponse {
        total: transactions.len(),
        transactions,
    })
}

/// Manual recategorization payload
///
/// `Category` deserialization bounds the value to the closed enumeration;
/// anything else is rejected before the handler runs.
#[derive(Debug, Deserialize)]
pub struct UpdateCategoryRequest {
    pub category: Category,
}

/// PATCH /api/transactions/:id/category - manual category override
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategorizedTransaction>, AppError> {
    match state.store.set_category(&id, payload.category) {
        Some(updated) => {
            info!(id = %id, category = %payload.category, "Category updated");
            Ok(Json(updated))
        }
        None => Err(AppError::not_found(&format!("No transaction with id {}", id))),
    }
}

/// DELETE /api/transactions - clear the in-memory state
pub async fn clear_transactions(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    state.store.clear();
    Json(serde_json::json!({ "cleared": true }))
}

/// GET /api/transactions/export - download the current list as a .json file
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
) -> Result<Response, AppError> {
    let transactions = state.store.snapshot();
    let body = export::export_transactions(&transactions).map_err(core_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transactions.json\"",
            ),
        ],
        body,
    )
        .into_response())
}

/// POST /api/transactions/import - re-import a previously exported file
///
/// The body is validated against the transaction shape; a malformed file is
/// rejected with 400 and the existing in-memory state is preserved.
pub async fn import_transactions(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<TransactionListResponse>, AppError> {
    let imported = export::import_transactions(&body).map_err(core_error)?;

    info!(count = imported.len(), "Imported transactions from file");
    state.store.replace_all(imported.clone());
    Ok(Json(TransactionListResponse {
        total: imported.len(),
        transactions: imported,
    }))
}
