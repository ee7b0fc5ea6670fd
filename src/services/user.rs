//! User registration and lookup.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::user::{CreateUser, User};
use crate::services::auth::hash_password;

/// Register a new user with a hashed password.
///
/// The email is checked up front so the common duplicate case gets a clear
/// message; the unique constraints still catch concurrent registrations.
pub async fn create_user(pool: &PgPool, input: &CreateUser) -> Result<User, AppError> {
    let email_taken: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(&input.email)
            .fetch_one(pool)
            .await?;
    if email_taken {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash, is_active)
        VALUES ($1, $2, $3, true)
        RETURNING *
        "#,
    )
    .bind(&input.username)
    .bind(&input.email)
    .bind(&password_hash)
    .fetch_one(pool)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Username or email already exists".to_string())
        }
        _ => AppError::Database(e),
    })?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Find a user by ID.
pub async fn find_user_by_id(pool: &PgPool, id: i32) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))
}
