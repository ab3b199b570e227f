//! Code reviews (§3.5).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review disposition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Pending,
}

/// A single review comment. Comment *count* is derived from the length of
/// the owning review's `comments` vec, not stored separately (§3.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewComment {
    pub body: String,
}

/// A code review on a pull request (§3.5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub pr_id: i64,
    pub reviewer: String,
    pub state: ReviewState,
    pub body: String,
    pub submitted_at: DateTime<Utc>,
    pub comments: Vec<ReviewComment>,
}

impl Review {
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}
