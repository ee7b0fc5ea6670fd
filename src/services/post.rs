//! Post service: creation, vote-counted reads, and owner-checked writes.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::pagination::ListParams;
use crate::models::post::{Post, PostInput, PostWithVotes};

/// Vote-count projection shared by the list and single-post queries.
const POST_WITH_VOTES: &str = r#"
    SELECT p.id, p.title, p.content, p.owner_id, p.created_at,
           COUNT(v.post_id) AS votes
    FROM posts p
    LEFT JOIN votes v ON v.post_id = p.id
"#;

/// Create a post owned by `owner_id`.
pub async fn create(pool: &PgPool, owner_id: i32, input: &PostInput) -> Result<Post, AppError> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, content, owner_id)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(owner_id)
    .fetch_one(pool)
    .await?;

    tracing::info!(post_id = post.id, owner_id, "Post created");
    Ok(post)
}

/// List posts with their vote counts, filtered by a title substring.
///
/// The match is case-sensitive and treats `%` and `_` literally.
pub async fn list(pool: &PgPool, params: &ListParams) -> Result<Vec<PostWithVotes>, AppError> {
    let sql = format!(
        "{POST_WITH_VOTES} WHERE strpos(p.title, $1) > 0 \
         GROUP BY p.id ORDER BY p.id ASC LIMIT $2 OFFSET $3"
    );

    let posts = sqlx::query_as::<_, PostWithVotes>(&sql)
        .bind(params.search())
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(pool)
        .await?;

    Ok(posts)
}

/// Fetch one post with its vote count.
pub async fn find_with_votes(pool: &PgPool, id: i32) -> Result<PostWithVotes, AppError> {
    let sql = format!("{POST_WITH_VOTES} WHERE p.id = $1 GROUP BY p.id");

    sqlx::query_as::<_, PostWithVotes>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Fetch the bare post row.
pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Post, AppError> {
    sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Replace a post's title and content. Only the owner may do this.
pub async fn update(
    pool: &PgPool,
    id: i32,
    caller_id: i32,
    input: &PostInput,
) -> Result<Post, AppError> {
    let existing = find_by_id(pool, id).await?;
    ensure_owner(&existing, caller_id)?;

    let post = sqlx::query_as::<_, Post>(
        "UPDATE posts SET title = $1, content = $2 WHERE id = $3 RETURNING *",
    )
    .bind(&input.title)
    .bind(&input.content)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, "Post updated");
    Ok(post)
}

/// Delete a post and, through the foreign key, its votes. Only the owner may do this.
pub async fn delete(pool: &PgPool, id: i32, caller_id: i32) -> Result<(), AppError> {
    let existing = find_by_id(pool, id).await?;
    ensure_owner(&existing, caller_id)?;

    let result = sqlx::query("DELETE FROM posts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    tracing::info!(post_id = id, "Post deleted");
    Ok(())
}

fn ensure_owner(post: &Post, caller_id: i32) -> Result<(), AppError> {
    if post.owner_id != caller_id {
        return Err(AppError::Forbidden(
            "Not authorized to perform requested action".to_string(),
        ));
    }
    Ok(())
}

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Post with id {id} not found"))
}
