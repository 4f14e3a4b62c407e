// handlers/commons/list.rs - GET /api/commons/all handler

use axum::{extract::State, Json};

use crate::database::models::Commons;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::state::AppState;

pub async fn commons_list(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Commons>>, ApiError> {
    let all = state.commons.find_all().await?;
    Ok(Json(all))
}
