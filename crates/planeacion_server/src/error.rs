use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use planeacion_core::PlanError;
use planeacion_core::error::ErrorCategory;
use serde_json::json;
use tracing::{error, warn};

/// Transport-side wrapper: the single place where plan errors become HTTP
/// responses.
#[derive(Debug)]
pub struct AppError(pub PlanError);

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        Self(err)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self.0.category() {
            ErrorCategory::ClientError => StatusCode::BAD_REQUEST,
            ErrorCategory::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            error!("ERROR: {message}");
        } else {
            warn!("Rejected request: {message}");
        }

        let body = match self.0.available_modalities() {
            Some(available) => json!({
                "error": message,
                "modalidades_disponibles": available,
            }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}
