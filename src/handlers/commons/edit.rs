// handlers/commons/edit.rs - PUT /api/commons?id= handler

use axum::{
    extract::{Query, State},
    Json,
};

use super::IdQuery;
use crate::database::models::Commons;
use crate::error::{not_found_message, ApiError};
use crate::middleware::AdminUser;
use crate::state::AppState;

/// Replace every editable field of an existing commons and echo the payload.
///
/// A missing commons is a 400 with a plain-text message, unlike delete and
/// show which answer 404 with a JSON body.
pub async fn commons_edit(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
    Json(payload): Json<Commons>,
) -> Result<Json<Commons>, ApiError> {
    let id = query.id;

    let Some(mut existing) = state.commons.find_by_id(id).await? else {
        tracing::warn!("Edit of missing commons {} requested by user {}", id, admin.user_id);
        return Err(ApiError::bad_request_text(not_found_message(Commons::ENTITY, id)));
    };

    existing.apply_edit(&payload);
    state.commons.save(existing).await?;
    tracing::info!("User {} updated commons {}", admin.user_id, id);

    Ok(Json(payload))
}
