//! Pull requests (§3.4) and the lifecycle state machine that produces them
//! (§4.E.3, §9 "PR lifecycle → explicit state machine").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// PR lifecycle state. `Open`/`Closed`/`Merged` are the only externally
/// visible states (§3.4); `Coding`/`Review` exist only inside the generator
/// (§4.E.3) and are not part of the stored `PullRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrState {
    Open,
    Closed,
    Merged,
}

/// Relative size band derived from `avg_pr_size_loc`, used to pick cycle-time
/// and quality modifiers (§4.E.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrSizeBand {
    Small,
    Medium,
    Large,
}

/// A synthesized pull request (§3.4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: i64,
    pub repo_name: String,
    pub number: i64,
    pub state: PrState,
    pub author_id: String,
    pub author_email: String,
    pub author_name: String,
    pub title: String,
    pub body: String,
    pub base_branch: String,
    pub head_branch: String,
    pub additions: i64,
    pub deletions: i64,
    pub changed_files: i64,
    pub ai_ratio: f64,
    pub tab_lines: i64,
    pub was_reverted: bool,
    pub is_bug_fix: bool,
    pub created_at: DateTime<Utc>,
    pub first_commit_at: DateTime<Utc>,
    pub first_review_at: Option<DateTime<Utc>>,
    pub last_commit_at: Option<DateTime<Utc>>,
    pub merged_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub reviewers: Vec<String>,
    pub commit_count: i64,
}

impl PullRequest {
    /// Check the §3.4 timestamp/state invariants. Returns the first
    /// violation found, if any; used by generator and store tests, not by
    /// production code paths (a violation there is a programmer bug, per
    /// §7's policy, not a recoverable error).
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if self.first_commit_at > self.created_at {
            return Err("first_commit_at must be <= created_at");
        }
        if let Some(review_at) = self.first_review_at
            && self.created_at > review_at
        {
            return Err("created_at must be <= first_review_at");
        }
        if let (Some(review_at), Some(merged_at)) = (self.first_review_at, self.merged_at)
            && review_at > merged_at
        {
            return Err("first_review_at must be <= merged_at");
        }
        match self.state {
            PrState::Merged => {
                if self.merged_at.is_none() {
                    return Err("merged state requires merged_at");
                }
            }
            PrState::Closed => {
                if self.closed_at.is_none() || self.merged_at.is_some() {
                    return Err("closed state requires closed_at and no merged_at");
                }
            }
            PrState::Open => {
                if self.merged_at.is_some() || self.closed_at.is_some() {
                    return Err("open state must have no merged_at/closed_at");
                }
            }
        }
        if self.additions < 0 || self.deletions < 0 || self.changed_files < 0 {
            return Err("additions/deletions/changed_files must be >= 0");
        }
        Ok(())
    }
}
