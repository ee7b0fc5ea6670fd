//! User routes: registration and profile lookup.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::extract::{JsonBody, PathParam};
use crate::models::user::{CreateUser, UserResponse};
use crate::services::user as user_service;
use crate::AppState;

/// POST /users — register a new account.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateUser>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    body.validate()?;
    let user = user_service::create_user(&state.db, &body).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::success(UserResponse::from(user)),
    ))
}

/// GET /users/me — current user profile.
pub async fn me(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = user_service::find_user_by_id(&state.db, current_user.id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}

/// GET /users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = user_service::find_user_by_id(&state.db, id).await?;
    Ok(ApiResponse::success(UserResponse::from(user)))
}
