//! Post routes. Every endpoint requires a bearer token.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::extract::{JsonBody, PathParam, QueryParams};
use crate::models::pagination::ListParams;
use crate::models::post::{Post, PostInput, PostWithVotes};
use crate::services::post as post_service;
use crate::AppState;

/// POST /posts — create a post owned by the caller.
pub async fn create(
    State(state): State<AppState>,
    current_user: CurrentUser,
    JsonBody(body): JsonBody<PostInput>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), AppError> {
    body.validate()?;
    let post = post_service::create(&state.db, current_user.id, &body).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(post)))
}

/// GET /posts?limit=&skip=&search= — list posts with vote counts.
pub async fn list(
    State(state): State<AppState>,
    _user: CurrentUser,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<ApiResponse<Vec<PostWithVotes>>>, AppError> {
    let posts = post_service::list(&state.db, &params).await?;
    Ok(ApiResponse::success(posts))
}

/// GET /posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: CurrentUser,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ApiResponse<PostWithVotes>>, AppError> {
    let post = post_service::find_with_votes(&state.db, id).await?;
    Ok(ApiResponse::success(post))
}

/// PUT /posts/{id} — owner only.
pub async fn update(
    State(state): State<AppState>,
    current_user: CurrentUser,
    PathParam(id): PathParam<i32>,
    JsonBody(body): JsonBody<PostInput>,
) -> Result<Json<ApiResponse<Post>>, AppError> {
    body.validate()?;
    let post = post_service::update(&state.db, id, current_user.id, &body).await?;
    Ok(ApiResponse::success(post))
}

/// DELETE /posts/{id} — owner only.
pub async fn delete(
    State(state): State<AppState>,
    current_user: CurrentUser,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, AppError> {
    post_service::delete(&state.db, id, current_user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
