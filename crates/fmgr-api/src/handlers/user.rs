//! User handlers.

use axum::Json;
use axum::extract::State;

use fmgr_entity::user::User;

use crate::dto::request::UserIdQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedQuery};
use crate::state::AppState;

/// GET /api/user/getUser?id=
pub async fn get_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<UserIdQuery>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.user_service.get_user(&auth, &query.id).await?;
    Ok(Json(ApiResponse::ok(user)))
}

/// GET /api/user/getAllUsers
pub async fn get_all_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    let users = state.user_service.list_users(&auth).await?;
    Ok(Json(ApiResponse::ok(users)))
}
