// handlers/commons/show.rs - GET /api/commons?id= handler

use axum::{
    extract::{Query, State},
    Json,
};

use super::IdQuery;
use crate::database::models::Commons;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

pub async fn commons_show(
    _user: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Commons>, ApiError> {
    state
        .commons
        .find_by_id(query.id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::entity_not_found(Commons::ENTITY, query.id))
}
