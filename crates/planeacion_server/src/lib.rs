//! Planeación HTTP service.
//!
//! Accepts lesson-plan payloads and answers with a generated `.docx`.
//!
//! # Routes
//!
//! - `GET /`, `GET /test`, `GET /health`: status probes.
//! - `GET /modalidades`: registry keys and their moments.
//! - `POST /generar-word`: generate a plan document.
//! - `POST /test-post`: echo the received JSON.

pub mod error;
pub mod generate;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use planeacion_core::{ModalityRegistry, ServerConfig};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use generate::{GeneratedPlan, content_disposition, generate_plan};

#[derive(Clone)]
pub struct AppState {
    pub registry: &'static ModalityRegistry,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: ModalityRegistry::global(),
            config: Arc::new(config),
        }
    }
}

/// Paths listed by the status probes.
pub const ROUTES: [&str; 3] = ["/generar-word", "/test", "/modalidades"];

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        // Status
        .route("/", get(routes::home))
        .route("/test", get(routes::test_connection))
        .route("/health", get(routes::health_check))
        // Registry
        .route("/modalidades", get(routes::list_modalities))
        // Generation
        .route("/generar-word", post(routes::generate_word))
        .route("/test-post", post(routes::test_post))
        // Middleware (applied in reverse order)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
