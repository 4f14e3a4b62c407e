// handlers/commons/create.rs - POST /api/commons/new handler

use axum::{extract::State, Json};

use crate::database::models::Commons;
use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::state::AppState;

/// Persist a new commons built from the request body and return it with its id
pub async fn commons_create(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Json(payload): Json<Commons>,
) -> Result<Json<Commons>, ApiError> {
    let commons = Commons { id: None, ..payload };
    let saved = state.commons.save(commons).await?;

    tracing::info!(
        "User {} created commons {:?} ({})",
        admin.user_id,
        saved.id,
        saved.name
    );
    Ok(Json(saved))
}
