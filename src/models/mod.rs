//! Database models and DTOs for users, posts and votes.

pub mod pagination;
pub mod post;
pub mod user;
pub mod vote;
