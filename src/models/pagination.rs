//! Offset/limit paging and title search for list endpoints.

use serde::Deserialize;

/// Query parameters accepted by `GET /posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub skip: Option<i64>,
    pub search: Option<String>,
}

impl ListParams {
    /// Maximum items per request.
    const MAX_LIMIT: i64 = 100;

    /// Default items per request.
    const DEFAULT_LIMIT: i64 = 10;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    /// Substring the title must contain; empty matches everything.
    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = ListParams::default();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.search(), "");
    }

    #[test]
    fn clamps_limit() {
        let p = ListParams {
            limit: Some(500),
            ..Default::default()
        };
        assert_eq!(p.limit(), 100);

        let p = ListParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(p.limit(), 1);
    }

    #[test]
    fn negative_skip_is_zero() {
        let p = ListParams {
            skip: Some(-5),
            ..Default::default()
        };
        assert_eq!(p.offset(), 0);
    }
}
