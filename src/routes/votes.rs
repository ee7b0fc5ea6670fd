//! Vote route.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::auth::CurrentUser;
use crate::middleware::extract::JsonBody;
use crate::models::vote::{VoteOutcome, VoteRequest};
use crate::services::vote as vote_service;
use crate::AppState;

/// POST /vote — `dir: 1` adds the caller's vote, `dir: 0` withdraws it.
pub async fn vote(
    State(state): State<AppState>,
    current_user: CurrentUser,
    JsonBody(body): JsonBody<VoteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<VoteOutcome>>), AppError> {
    body.validate()?;
    tracing::debug!(
        user = %current_user.username,
        post_id = body.post_id,
        dir = body.dir,
        "Vote requested"
    );
    let outcome = vote_service::cast(&state.db, current_user.id, &body).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(outcome)))
}
