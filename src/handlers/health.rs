// handlers/health.rs - public service information and liveness

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service name, version and endpoint overview
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Commons API",
        "version": version,
        "endpoints": {
            "health": "/health (public)",
            "commons": "/api/commons/all, /api/commons?id= (authenticated)",
            "join": "/api/commons/join?commonsId= (authenticated)",
            "admin": "/api/commons/new, /api/commons/delete?id=, PUT /api/commons?id= (admin)",
        }
    }))
}

/// GET /health - 200 while storage answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.commons.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "storage": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "storage": "unavailable"
                })),
            )
        }
    }
}
