//! Vote request and the toggle it resolves to.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::AppError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VoteRequest {
    pub post_id: i32,
    #[validate(range(min = 0, max = 1))]
    pub dir: i16,
}

/// What a vote request asks for: `1` adds the caller's vote, `0` withdraws it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDirection {
    Up,
    Withdraw,
}

impl TryFrom<i16> for VoteDirection {
    type Error = AppError;

    fn try_from(dir: i16) -> Result<Self, Self::Error> {
        match dir {
            1 => Ok(Self::Up),
            0 => Ok(Self::Withdraw),
            other => Err(AppError::Validation(format!(
                "dir: must be 0 or 1, got {other}"
            ))),
        }
    }
}

/// Outcome of a successful vote request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VoteOutcome {
    pub post_id: i32,
    pub voted: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_dir() {
        assert_eq!(VoteDirection::try_from(1).unwrap(), VoteDirection::Up);
        assert_eq!(VoteDirection::try_from(0).unwrap(), VoteDirection::Withdraw);
        assert!(VoteDirection::try_from(-1).is_err());
        assert!(VoteDirection::try_from(2).is_err());
    }

    #[test]
    fn out_of_range_dir_fails_validation() {
        let req = VoteRequest { post_id: 1, dir: 2 };
        assert!(req.validate().is_err());
        let req = VoteRequest { post_id: 1, dir: -1 };
        assert!(req.validate().is_err());
        let req = VoteRequest { post_id: 1, dir: 1 };
        assert!(req.validate().is_ok());
    }
}
