//! FinSight Web Server
//!
//! Axum-based REST API for the FinSight statement dashboard.
//!
//! The server owns one in-memory transaction store (one browser session's
//! worth of state) and the AI pipeline. Uploading a statement runs the full
//! extract -> categorize -> merge pipeline and replaces the store; the
//! dashboard endpoints are pure reads over the current collection.

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::{error, info, warn};

use finsight_core::ai::{AIBackend, AIClient};
use finsight_core::store::TransactionStore;

mod handlers;

/// Maximum statement upload size (10 MB)
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    /// The single owned transaction store for this server's session
    pub store: TransactionStore,
    /// AI backend for the extraction/categorization calls, if configured
    pub ai: Option<AIClient>,
}

impl AppState {
    /// The pipeline for the configured AI backend, or a 503 if there is none
    fn pipeline(&self) -> Result<finsight_core::Pipeline<AIClient>, AppError> {
        match &self.ai {
            Some(client) => Ok(finsight_core::Pipeline::new(client.clone())),
            None => Err(AppError::unavailable(
                "AI backend not configured (set OLLAMA_HOST or AI_BACKEND=mock)",
            )),
        }
    }
}

/// Create the application router
pub fn create_router(ai: Option<AIClient>, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        store: TransactionStore::new(),
        ai,
    });

    let api_routes = Router::new()
        // Statement ingestion
        .route("/statements", post(handlers::upload_statement))
        .route("/statements/json", post(handlers::upload_statement_json))
        .route("/sample", post(handlers::load_sample))
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).delete(handlers::clear_transactions),
        )
        .route(
            "/transactions/:id/category",
            patch(handlers::update_category),
        )
        .route("/transactions/export", get(handlers::export_transactions))
        .route("/transactions/import", post(handlers::import_transactions))
        // Dashboard
        .route("/dashboard", get(handlers::get_dashboard))
        // Health
        .route("/health", get(handlers::health))
        .with_state(state);

    // CORS: same-origin only unless origins are explicitly allowed
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
            .allow_headers([axum::http::header::CONTENT_TYPE])
    };

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_SIZE))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Serve the dashboard frontend if a directory is provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server
pub async fn serve(
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let ai = AIClient::from_env();
    check_ai_connection(&ai).await;

    let app = create_router(ai, static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(ai: &Option<AIClient>) {
    match ai {
        Some(client) => {
            if client.health_check().await {
                info!(
                    "AI backend connected: {} (model: {})",
                    client.host(),
                    client.model()
                );
            } else {
                warn!(
                    "AI backend configured but not responding: {} (model: {})",
                    client.host(),
                    client.model()
                );
            }
        }
        None => {
            info!("AI backend not configured (set OLLAMA_HOST to enable statement uploads)");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn bad_gateway(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

/// Map core pipeline errors to user-facing responses
///
/// Every stage failure becomes one human-readable message, per the original
/// error surface: extraction problems and empty extractions are the user's
/// document, model/network failures are upstream.
pub fn core_error(err: finsight_core::Error) -> AppError {
    use finsight_core::Error;
    match err {
        Error::Extraction(_) | Error::NoTransactions | Error::InvalidData(_) => {
            AppError::bad_request(&err.to_string())
        }
        Error::Import(_) => AppError::bad_request(&err.to_string()),
        Error::Categorization(_) | Error::Http(_) => AppError::bad_gateway(&err.to_string()),
        other => other.into(),
    }
}
