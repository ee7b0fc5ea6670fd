//! In-process router tests for paths that are decided before the database is reached.
//!
//! The pool connects lazily to an address nothing listens on, so any request
//! that did reach the database would fail instead of passing by accident.

use std::collections::HashMap;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use postboard::config::AppConfig;
use postboard::services::auth::{issue_token, Claims};
use postboard::AppState;
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const SECRET: &str = "api-test-secret";

fn test_config() -> AppConfig {
    let env = HashMap::from([
        ("DATABASE_HOSTNAME", "127.0.0.1"),
        ("DATABASE_PORT", "1"),
        ("DATABASE_USERNAME", "nobody"),
        ("DATABASE_PASSWORD", "nothing"),
        ("DATABASE_NAME", "none"),
        ("SECRET_KEY", SECRET),
        ("ALGORITHM", "HS256"),
        ("ACCESS_TOKEN_EXPIRE_MINUTES", "30"),
    ]);
    AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).expect("config")
}

fn app() -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(config.connect_options());
    postboard::routes::router(AppState { db: pool, config })
}

async fn send(request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app().oneshot(request).await.expect("response");
    let status = response.status();
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, challenge, body)
}

fn get_with_auth(uri: &str, authorization: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn signed_token(secret: &str, exp_offset_secs: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        user_id: 1,
        iat: now,
        exp: now + exp_offset_secs,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[tokio::test]
async fn liveness_check_is_ok() {
    let request = Request::builder()
        .uri("/health/live")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let request = Request::builder()
        .uri("/nowhere")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn posts_require_a_token() {
    let request = Request::builder()
        .uri("/posts")
        .body(Body::empty())
        .unwrap();
    let (status, challenge, body) = send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(challenge.as_deref(), Some("Bearer"));
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_token_is_unauthorized() {
    let (status, _, _) = send(get_with_auth("/posts", "Bearer not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let (status, _, _) = send(get_with_auth("/users/me", "Basic YWxpY2U6c2VjcmV0")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_other_secret_is_unauthorized() {
    let token = signed_token("someone-else", 600);
    let (status, _, _) = send(get_with_auth("/posts/1", &format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_unauthorized() {
    let token = signed_token(SECRET, -3600);
    let (status, _, _) = send(get_with_auth("/users/me", &format!("Bearer {token}"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn vote_requires_a_token() {
    let (status, _, _) = send(post_json("/vote", json!({"post_id": 1, "dir": 1}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_validates_before_touching_the_database() {
    let (status, _, body) = send(post_json(
        "/users",
        json!({"username": "alice", "email": "not-an-email", "password": "long-enough"}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("email"));
}

#[tokio::test]
async fn short_password_is_rejected() {
    let (status, _, body) = send(post_json(
        "/users",
        json!({"username": "alice", "email": "alice@example.com", "password": "short"}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("password"));
}

#[tokio::test]
async fn login_rejects_malformed_email() {
    let (status, _, body) = send(post_json(
        "/login",
        json!({"email": "alice", "password": "whatever"}),
    ))
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[test]
fn issued_token_uses_configured_secret() {
    let config = test_config();
    let token = issue_token(9, &config.token).unwrap();
    let claims = postboard::services::auth::validate_token(&token.access_token, &config.token)
        .unwrap();
    assert_eq!(claims.user_id, 9);
}

#[tokio::test]
async fn missing_body_field_uses_error_envelope() {
    let (status, _, body) = send(post_json("/users", json!({"email": "a@b.c"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("username"));
}

#[tokio::test]
async fn non_numeric_path_id_uses_error_envelope() {
    let request = Request::builder()
        .uri("/users/abc")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn malformed_json_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn missing_content_type_uses_error_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/login")
        .body(Body::from(
            json!({"email": "a@b.c", "password": "x"}).to_string(),
        ))
        .unwrap();
    let (status, _, body) = send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn server_binds_to_host_name() {
    let mut config = test_config();
    config.host = "localhost".to_string();
    config.port = 0;
    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .expect("bind localhost");
    assert!(listener.local_addr().unwrap().ip().is_loopback());
}
