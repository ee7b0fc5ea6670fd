//! Seed script for development — populates a fresh database with sample data.
//!
//! Usage: `cargo run --bin seed`
//!
//! Reads the same environment variables as the server (including `.env`).

use postboard::config::AppConfig;
use postboard::services::auth::hash_password;
use sqlx::PgPool;

const DEMO_PASSWORD: &str = "Password123!";

const DEMO_USERS: &[(&str, &str)] = &[
    ("alice", "alice@postboard.local"),
    ("bob", "bob@postboard.local"),
    ("carol", "carol@postboard.local"),
];

const DEMO_POSTS: &[(&str, &str, &str)] = &[
    ("alice", "Getting started with Rust", "Ownership first, lifetimes later."),
    ("alice", "Favourite beaches", "Anything with a long, quiet shoreline."),
    ("bob", "Rust web frameworks", "Axum has been pleasant to work with."),
    ("carol", "Weekend hiking", "Three peaks in two days."),
];

/// (voter, post title) pairs.
const DEMO_VOTES: &[(&str, &str)] = &[
    ("bob", "Getting started with Rust"),
    ("carol", "Getting started with Rust"),
    ("alice", "Rust web frameworks"),
    ("carol", "Rust web frameworks"),
    ("bob", "Weekend hiking"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let pool = postboard::db::create_pool(config.connect_options(), 5).await?;

    // Run migrations first
    postboard::db::run_migrations(&pool).await?;

    println!("=== postboard seed script ===");

    seed_users(&pool).await?;
    seed_posts(&pool).await?;
    seed_votes(&pool).await?;

    println!("\n=== Seed complete! ===");
    println!("Login with any of alice/bob/carol @postboard.local and password {DEMO_PASSWORD}");

    Ok(())
}

async fn seed_users(pool: &PgPool) -> anyhow::Result<()> {
    let hash = hash_password(DEMO_PASSWORD)?;
    let mut created = 0;

    for &(username, email) in DEMO_USERS {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO UPDATE SET password_hash = EXCLUDED.password_hash",
        )
        .bind(username)
        .bind(email)
        .bind(&hash)
        .execute(pool)
        .await?;
        created += result.rows_affected();
    }

    println!("[done] Upserted {created} users");
    Ok(())
}

async fn seed_posts(pool: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        println!("[skip] {count} posts already present");
        return Ok(());
    }

    for &(owner, title, content) in DEMO_POSTS {
        sqlx::query(
            "INSERT INTO posts (title, content, owner_id)
             SELECT $1, $2, id FROM users WHERE username = $3",
        )
        .bind(title)
        .bind(content)
        .bind(owner)
        .execute(pool)
        .await?;
    }

    println!("[done] Created {} posts", DEMO_POSTS.len());
    Ok(())
}

async fn seed_votes(pool: &PgPool) -> anyhow::Result<()> {
    let mut added = 0;

    for &(voter, title) in DEMO_VOTES {
        let result = sqlx::query(
            "INSERT INTO votes (user_id, post_id)
             SELECT u.id, p.id FROM users u, posts p
             WHERE u.username = $1 AND p.title = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(voter)
        .bind(title)
        .execute(pool)
        .await?;
        added += result.rows_affected();
    }

    println!("[done] Added {added} votes");
    Ok(())
}
