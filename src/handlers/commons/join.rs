// handlers/commons/join.rs - POST /api/commons/join?commonsId= handler

use axum::{
    extract::{Query, State},
    Json,
};

use super::JoinQuery;
use crate::database::models::{Commons, UserCommons};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Add a membership for `payload.userId` in the commons and return the commons.
///
/// At most one membership exists per (user, commons): when one is already
/// present nothing is written and the commons is returned as for a new join.
pub async fn commons_join(
    user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<JoinQuery>,
    Json(payload): Json<UserCommons>,
) -> Result<Json<Commons>, ApiError> {
    let commons_id = query.commons_id;
    tracing::debug!(
        "User {} requested membership of user {} in commons {}",
        user.user_id,
        payload.user_id,
        commons_id
    );

    let commons = state
        .commons
        .find_by_id(commons_id)
        .await?
        .ok_or_else(|| ApiError::entity_not_found(Commons::ENTITY, commons_id))?;

    let existing = state
        .user_commons
        .find_by_commons_id_and_user_id(commons_id, payload.user_id)
        .await?;

    match existing {
        Some(membership) => {
            tracing::info!(
                "User {} already belongs to commons {} (membership {:?})",
                membership.user_id,
                commons_id,
                membership.id
            );
        }
        None => {
            let membership = UserCommons {
                id: None,
                commons_id,
                ..payload
            };
            let saved = state.user_commons.save(membership).await?;
            tracing::info!(
                "User {} joined commons {} (membership {:?})",
                saved.user_id,
                commons_id,
                saved.id
            );
        }
    }

    Ok(Json(commons))
}
