//! Vote toggling: a row in `votes` is an upvote, its absence is none.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::vote::{VoteDirection, VoteOutcome, VoteRequest};
use crate::services::post;

/// Apply a vote request on behalf of `user_id`.
///
/// The post must exist. Adding a vote that already exists is a conflict and
/// withdrawing one that does not exist is not-found; neither mutates anything.
pub async fn cast(pool: &PgPool, user_id: i32, req: &VoteRequest) -> Result<VoteOutcome, AppError> {
    let direction = VoteDirection::try_from(req.dir)?;
    post::find_by_id(pool, req.post_id).await?;

    match direction {
        VoteDirection::Up => {
            let result = sqlx::query(
                "INSERT INTO votes (user_id, post_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(req.post_id)
            .execute(pool)
            .await
            .map_err(|e| match e {
                // Post deleted between the existence check and the insert.
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::NotFound(format!("Post with id {} not found", req.post_id))
                }
                _ => AppError::Database(e),
            })?;

            if result.rows_affected() == 0 {
                return Err(AppError::Conflict(format!(
                    "User {user_id} has already voted on post {}",
                    req.post_id
                )));
            }

            tracing::info!(user_id, post_id = req.post_id, "Vote added");
            Ok(VoteOutcome {
                post_id: req.post_id,
                voted: true,
                message: "Successfully added vote".to_string(),
            })
        }
        VoteDirection::Withdraw => {
            let result = sqlx::query("DELETE FROM votes WHERE user_id = $1 AND post_id = $2")
                .bind(user_id)
                .bind(req.post_id)
                .execute(pool)
                .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("Vote does not exist".to_string()));
            }

            tracing::info!(user_id, post_id = req.post_id, "Vote withdrawn");
            Ok(VoteOutcome {
                post_id: req.post_id,
                voted: false,
                message: "Successfully deleted vote".to_string(),
            })
        }
    }
}
