//! HTTP server for the mind-reading form
//!
//! - GET  /             - Form page
//! - GET  /random       - Redirect to the form with a random preset pair
//! - POST /analyze      - Form submission, renders the result page
//! - POST /api/analyze  - JSON analysis
//! - GET  /api/status   - Health check
//! - GET  /api/presets  - Suggestion lists

pub mod error;
mod handlers;
pub mod page;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;
use crate::gemini::{GeminiClient, GenerationClient};
use crate::prompt::PromptTemplate;

// ============================================================================
// Server State
// ============================================================================

/// Read-only dependencies shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn GenerationClient>,
    pub template: Arc<PromptTemplate>,
    pub model: String,
}

impl AppState {
    pub fn new(generator: Arc<dyn GenerationClient>, template: PromptTemplate, model: impl Into<String>) -> Self {
        Self {
            generator,
            template: Arc::new(template),
            model: model.into(),
        }
    }

    /// Wire the real Gemini client from a loaded configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        let client = GeminiClient::from_config(config);
        Self::new(Arc::new(client), config.template.clone(), config.model.clone())
    }
}

// ============================================================================
// Routes
// ============================================================================

/// Create the router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/random", get(handlers::random_handler))
        .route("/analyze", post(handlers::analyze_form_handler))
        .route("/api/analyze", post(handlers::analyze_api_handler))
        .route("/api/status", get(handlers::status_handler))
        .route("/api/presets", get(handlers::presets_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until the listener fails
pub async fn run(config: &AppConfig) -> Result<()> {
    let state = AppState::from_config(config);
    let app = create_router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Model: {}", config.model);
    info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;
    Ok(())
}
