//! Authentication service: password hashing, bearer tokens, and login.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::config::TokenSettings;
use crate::errors::AppError;
use crate::models::user::User;

/// JWT claims embedded in access tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub user_id: i32,
    pub exp: i64,
    pub iat: i64,
}

/// Token returned on successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

/// Verify a plaintext password against a stored hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Sign an access token for `user_id` valid for the configured lifetime.
pub fn issue_token(user_id: i32, settings: &TokenSettings) -> Result<Token, AppError> {
    issue_token_with_lifetime(user_id, settings, Duration::minutes(settings.expire_minutes))
}

fn issue_token_with_lifetime(
    user_id: i32,
    settings: &TokenSettings,
    lifetime: Duration,
) -> Result<Token, AppError> {
    let now = Utc::now();
    let claims = Claims {
        user_id,
        exp: (now + lifetime).timestamp(),
        iat: now.timestamp(),
    };

    let access_token = jsonwebtoken::encode(
        &Header::new(settings.algorithm),
        &claims,
        &EncodingKey::from_secret(settings.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {e}")))?;

    Ok(Token {
        access_token,
        token_type: "bearer".to_string(),
    })
}

/// Validate a JWT and return the claims.
///
/// Bad signatures, wrong algorithms, expiry and malformed input all collapse
/// into [`AppError::Unauthorized`].
pub fn validate_token(token: &str, settings: &TokenSettings) -> Result<Claims, AppError> {
    let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());
    let validation = Validation::new(settings.algorithm);

    jsonwebtoken::decode::<Claims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected bearer token");
            AppError::Unauthorized
        })
}

/// Authenticate a user by email and password, returning an access token.
pub async fn login(
    pool: &PgPool,
    email: &str,
    password: &str,
    settings: &TokenSettings,
) -> Result<Token, AppError> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    let user = check_credentials(user, password)?;

    tracing::info!(user_id = user.id, "User logged in");
    issue_token(user.id, settings)
}

/// Decide a login attempt for the row found by email, if any.
///
/// Unknown emails are verified against a throwaway hash so every rejection
/// costs one argon2 verification.
fn check_credentials(user: Option<User>, password: &str) -> Result<User, AppError> {
    let Some(user) = user else {
        if let Some(hash) = dummy_hash() {
            let _ = verify_password(password, hash);
        }
        tracing::info!("Login rejected for unknown email");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash)? || !user.is_active {
        tracing::info!(user_id = user.id, "Login rejected");
        return Err(AppError::InvalidCredentials);
    }

    Ok(user)
}

fn dummy_hash() -> Option<&'static str> {
    static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();
    DUMMY_HASH
        .get_or_init(|| hash_password("postboard-unknown-user").ok())
        .as_deref()
}

/// Resolve the user a validated token refers to.
///
/// A token for a user that no longer exists or has been deactivated is
/// treated the same as an invalid token.
pub async fn resolve_user(pool: &PgPool, claims: &Claims) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active = true")
        .bind(claims.user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)
}
