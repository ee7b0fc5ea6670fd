//! Post model and the vote-count projection used by read endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub owner_id: i32,
    pub created_at: DateTime<Utc>,
}

/// A post together with the number of votes it has received.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PostWithVotes {
    #[sqlx(flatten)]
    pub post: Post,
    pub votes: i64,
}

/// Body for creating or replacing a post. The owner always comes from the token.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PostInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_supplied_owner_is_ignored() {
        let input: PostInput = serde_json::from_str(
            r#"{"title": "Hello", "content": "World", "owner_id": 999}"#,
        )
        .unwrap();
        assert_eq!(input.title, "Hello");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_title_rejected() {
        let input = PostInput {
            title: String::new(),
            content: "body".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn post_with_votes_shape() {
        let item = PostWithVotes {
            post: Post {
                id: 1,
                title: "t".to_string(),
                content: "c".to_string(),
                owner_id: 2,
                created_at: Utc::now(),
            },
            votes: 3,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["post"]["owner_id"], 2);
        assert_eq!(json["votes"], 3);
    }
}
