use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use planeacion_core::PlanError;
use planeacion_docs::DOCX_CONTENT_TYPE;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::error::AppError;
use crate::generate::{content_disposition, generate_plan};
use crate::{AppState, ROUTES};

// ============================================================================
// Status
// ============================================================================

pub async fn home() -> impl IntoResponse {
    info!("HOME: Endpoint raíz accedido");
    Json(json!({
        "status": "OK",
        "message": "Servidor Plantcher Word está funcionando",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn test_connection() -> impl IntoResponse {
    info!("TEST: Endpoint de prueba accedido");
    Json(json!({
        "status": "OK",
        "message": "Servidor funcionando correctamente",
        "rutas_disponibles": ROUTES,
    }))
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

// ============================================================================
// Registry
// ============================================================================

pub async fn list_modalities(State(state): State<AppState>) -> impl IntoResponse {
    info!("MODALIDADES: Solicitando lista de modalidades");
    let mut config = Map::new();
    for modality in state.registry.iter() {
        let moments: Vec<Value> = modality
            .moments
            .iter()
            .map(|m| json!([&m.label, &m.key]))
            .collect();
        config.insert(modality.name.clone(), Value::Array(moments));
    }
    Json(json!({
        "modalidades": state.registry.names(),
        "config": config,
    }))
}

// ============================================================================
// Generation
// ============================================================================

pub async fn generate_word(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let registry = state.registry;
    let plan = tokio::task::spawn_blocking(move || generate_plan(registry, &body))
        .await
        .map_err(|e| PlanError::Assembly(format!("document generation aborted: {e}")))??;

    let disposition = HeaderValue::from_str(&content_disposition(&plan.file_name))
        .map_err(|e| PlanError::Render(format!("invalid file name: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(DOCX_CONTENT_TYPE)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        plan.bytes,
    )
        .into_response())
}

pub async fn test_post(body: Bytes) -> Result<Json<Value>, AppError> {
    info!("TEST-POST: Endpoint de prueba POST accedido");
    let received = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        serde_json::from_slice(&body).map_err(|e| PlanError::InvalidJson(e.to_string()))?
    };
    info!("Datos recibidos en POST: {received}");
    Ok(Json(json!({
        "status": "OK",
        "message": "POST funcionando correctamente",
        "datos_recibidos": received,
    })))
}
