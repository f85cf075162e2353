//! Dashboard aggregation and health handlers

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use finsight_core::ai::AIBackend;
use finsight_core::models::{CategorySpending, Summary};
use finsight_core::summary::{category_spending, summarize};

use crate::AppState;

#[derive(Serialize)]
pub struct DashboardResponse {
    pub summary: Summary,
    pub category_spending: Vec<CategorySpending>,
}

/// GET /api/dashboard - KPI totals and per-category spending
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    let transactions = state.store.snapshot();
    Json(DashboardResponse {
        summary: summarize(&transactions),
        category_spending: category_spending(&transactions),
    })
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub ai_configured: bool,
    pub ai_healthy: bool,
    pub ai_model: Option<String>,
}

/// GET /api/health - server and AI backend status
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (ai_configured, ai_healthy, ai_model) = match &state.ai {
        Some(client) => (
            true,
            client.health_check().await,
            Some(client.model().to_string()),
        ),
        None => (false, false, None),
    };

    Json(HealthResponse {
        status: "ok",
        ai_configured,
        ai_healthy,
        ai_model,
    })
}
