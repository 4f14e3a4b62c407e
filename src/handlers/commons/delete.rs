// handlers/commons/delete.rs - DELETE /api/commons/delete handler

use axum::extract::{Query, State};

use super::IdQuery;
use crate::database::models::Commons;
use crate::error::ApiError;
use crate::middleware::AdminUser;
use crate::state::AppState;

/// Delete a commons by id.
///
/// Answers with a plain-text confirmation, or 404 with a JSON error body
/// when the commons does not exist.
pub async fn commons_delete(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<String, ApiError> {
    let id = query.id;

    if state.commons.find_by_id(id).await?.is_none() {
        tracing::warn!("Delete of missing commons {} requested by user {}", id, admin.user_id);
        return Err(ApiError::entity_not_found(Commons::ENTITY, id));
    }

    state.commons.delete_by_id(id).await?;
    tracing::info!("User {} deleted commons {}", admin.user_id, id);

    Ok(format!("commons with id {} deleted", id))
}
