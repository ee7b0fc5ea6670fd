//! Login route.

use axum::{extract::State, Json};
use validator::Validate;

use crate::errors::{ApiResponse, AppError};
use crate::middleware::extract::JsonBody;
use crate::models::user::LoginRequest;
use crate::services::auth::{self as auth_service, Token};
use crate::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<Json<ApiResponse<Token>>, AppError> {
    body.validate()?;
    let token =
        auth_service::login(&state.db, &body.email, &body.password, &state.config.token).await?;
    Ok(ApiResponse::success(token))
}
