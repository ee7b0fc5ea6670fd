//! Route definitions and router assembly.

pub mod auth;
pub mod health;
pub mod posts;
pub mod users;
pub mod votes;

use axum::{
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::errors::ApiResponse;
use crate::AppState;

/// Build the full application router with CORS and request tracing.
pub fn router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_routes = Router::new()
        .route("/users", post(users::create))
        .route("/users/me", get(users::me))
        .route("/users/{id}", get(users::get_by_id));

    let post_routes = Router::new()
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::get_by_id)
                .put(posts::update)
                .delete(posts::delete),
        );

    Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .route("/login", post(auth::login))
        .route("/vote", post(votes::vote))
        .merge(user_routes)
        .merge(post_routes)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        ApiResponse::<()>::error("NOT_FOUND", "Route not found"),
    )
}
