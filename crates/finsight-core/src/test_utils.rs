//! Test utilities for finsight-core
//!
//! This module provides testing infrastructure including a mock Ollama
//! server that can be used for development and integration tests of the
//! real HTTP backend.

use axum::{
    extract::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::sync::oneshot;

use crate::ai::MockBackend;

/// Mock Ollama server for testing and development
pub struct MockOllamaServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockOllamaServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/api/tags", get(handle_tags))
            .route("/api/generate", post(handle_generate));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockOllamaServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Ollama tags endpoint response (health check)
async fn handle_tags() -> Json<TagsResponse> {
    Json(TagsResponse {
        models: vec![ModelInfo {
            name: "llama3.2:latest".to_string(),
            modified_at: "2024-01-01T00:00:00Z".to_string(),
            size: 4_000_000_000,
        }],
    })
}

/// Ollama generate endpoint
///
/// Detects which prompt this is from the rendered template markers and
/// produces the JSON the real model is asked for, using the same
/// deterministic logic as `MockBackend`.
async fn handle_generate(Json(request): Json<GenerateRequest>) -> Json<GenerateResponse> {
    let response = if let Some(statement) = section_after(&request.prompt, "Statement:") {
        mock_extraction_json(statement)
    } else if let Some(lines) = section_after(&request.prompt, "Transactions:") {
        mock_categorization_json(lines)
    } else {
        "I don't understand this prompt.".to_string()
    };

    Json(GenerateResponse {
        model: request.model,
        response,
        done: true,
    })
}

fn section_after<'a>(prompt: &'a str, marker: &str) -> Option<&'a str> {
    prompt.find(marker).map(|pos| &prompt[pos + marker.len()..])
}

fn mock_extraction_json(statement: &str) -> String {
    let mut rows = Vec::new();
    for line in statement.lines() {
        let parts: Vec<&str> = line.trim().split('|').collect();
        if parts.len() != 3 {
            continue;
        }
        let (Ok(_), Ok(amount)) = (
            parts[0].trim().parse::<chrono::NaiveDate>(),
            parts[2].trim().parse::<f64>(),
        ) else {
            continue;
        };
        let tx_type = if amount < 0.0 { "expense" } else { "income" };
        rows.push(serde_json::json!({
            "date": parts[0].trim(),
            "description": parts[1].trim(),
            "amount": amount,
            "type": tx_type,
        }));
    }
    serde_json::json!({ "transactions": rows }).to_string()
}

fn mock_categorization_json(lines: &str) -> String {
    let mut rows = Vec::new();
    // Input lines look like: - Date: 2024-07-20, Amount: -120.5, Description: Trader Joe's
    for line in lines.lines() {
        let line = line.trim().trim_start_matches("- ");
        let Some(date) = field(line, "Date: ") else {
            continue;
        };
        let Some(amount_str) = field(line, "Amount: ") else {
            continue;
        };
        let Some(description) = line.split("Description: ").nth(1) else {
            continue;
        };
        let Ok(amount) = amount_str.parse::<f64>() else {
            continue;
        };
        rows.push(serde_json::json!({
            "date": date,
            "description": description.trim(),
            "amount": amount,
            "category": MockBackend::categorize_description(description).as_str(),
        }));
    }
    serde_json::json!({ "categorized_transactions": rows }).to_string()
}

/// Extract a comma-terminated field value from a prompt line
fn field<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    let start = line.find(marker)? + marker.len();
    let rest = &line[start..];
    Some(rest.split(',').next().unwrap_or(rest).trim())
}

#[derive(Debug, Deserialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[allow(dead_code)]
    #[serde(default)]
    stream: bool,
}

#[derive(Debug, Serialize)]
struct GenerateResponse {
    model: String,
    response: String,
    done: bool,
}

#[derive(Debug, Serialize)]
struct TagsResponse {
    models: Vec<ModelInfo>,
}

#[derive(Debug, Serialize)]
struct ModelInfo {
    name: String,
    modified_at: String,
    size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AIBackend, ExpenseInput, OllamaBackend};
    use crate::models::TransactionType;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_ollama_backend_health_check_against_mock_server() {
        let server = MockOllamaServer::start().await;
        let backend = OllamaBackend::new(&server.url(), "llama3.2");
        assert!(backend.health_check().await);
    }

    #[tokio::test]
    async fn test_ollama_backend_extraction_against_mock_server() {
        let server = MockOllamaServer::start().await;
        let backend = OllamaBackend::new(&server.url(), "llama3.2");

        let txs = backend
            .extract_transactions(
                "2024-07-15|Salary Deposit|5000\n2024-07-20|Trader Joe's|-120.50",
            )
            .await
            .unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].transaction_type, TransactionType::Income);
        assert_eq!(txs[1].description, "Trader Joe's");
    }

    #[tokio::test]
    async fn test_ollama_backend_categorization_against_mock_server() {
        let server = MockOllamaServer::start().await;
        let backend = OllamaBackend::new(&server.url(), "llama3.2");

        let expenses = vec![ExpenseInput {
            date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            description: "Trader Joe's".into(),
            amount: -120.5,
        }];
        let result = backend.categorize_expenses(&expenses).await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Groceries");
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_health_check() {
        let backend = OllamaBackend::new("http://127.0.0.1:1", "llama3.2");
        assert!(!backend.health_check().await);
    }
}
