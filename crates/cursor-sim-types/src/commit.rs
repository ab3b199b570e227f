//! Commits (§3.3).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The event-kind a changed line is attributed to, before being rolled into
/// a commit's aggregate buckets (§4.E.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Tab,
    Composer,
    NonAi,
}

/// The six stored line-count buckets of §3.3: `tab`, `composer`, and
/// `non_ai`, each split into `added`/`deleted`. `total_added`/`total_deleted`
/// are derived, not stored, since they are always the sum of the other
/// three categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineBuckets {
    pub tab_added: u64,
    pub tab_deleted: u64,
    pub composer_added: u64,
    pub composer_deleted: u64,
    pub non_ai_added: u64,
    pub non_ai_deleted: u64,
}

impl LineBuckets {
    pub fn total_added(&self) -> u64 {
        self.tab_added + self.composer_added + self.non_ai_added
    }

    pub fn total_deleted(&self) -> u64 {
        self.tab_deleted + self.composer_deleted + self.non_ai_deleted
    }

    /// Share of added lines attributable to AI (tab + composer) over total
    /// additions (GLOSSARY: "AI ratio"). `0.0` when nothing was added.
    pub fn ai_ratio(&self) -> f64 {
        let total = self.total_added();
        if total == 0 {
            return 0.0;
        }
        (self.tab_added + self.composer_added) as f64 / total as f64
    }

    /// Accumulate one sampled line-change event into the running buckets.
    pub fn accumulate(&mut self, kind: EventKind, added: u64, deleted: u64) {
        match kind {
            EventKind::Tab => {
                self.tab_added += added;
                self.tab_deleted += deleted;
            }
            EventKind::Composer => {
                self.composer_added += added;
                self.composer_deleted += deleted;
            }
            EventKind::NonAi => {
                self.non_ai_added += added;
                self.non_ai_deleted += deleted;
            }
        }
    }
}

/// A synthesized commit (§3.3). Content-addressed by `commit_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub commit_hash: String,
    pub user_id: String,
    pub user_email: String,
    pub user_name: String,
    pub repo_name: String,
    pub branch_name: String,
    pub is_primary_branch: bool,
    pub lines: LineBuckets,
    pub commit_ts: DateTime<Utc>,
    pub pull_request_number: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_ratio_is_zero_with_no_additions() {
        let buckets = LineBuckets::default();
        assert_eq!(buckets.ai_ratio(), 0.0);
    }

    #[test]
    fn ai_ratio_counts_tab_and_composer_but_not_non_ai() {
        let mut buckets = LineBuckets::default();
        buckets.accumulate(EventKind::Tab, 30, 0);
        buckets.accumulate(EventKind::Composer, 20, 0);
        buckets.accumulate(EventKind::NonAi, 50, 0);

        assert_eq!(buckets.total_added(), 100);
        assert!((buckets.ai_ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn accumulate_keeps_added_and_deleted_separate() {
        let mut buckets = LineBuckets::default();
        buckets.accumulate(EventKind::NonAi, 10, 4);
        assert_eq!(buckets.non_ai_added, 10);
        assert_eq!(buckets.non_ai_deleted, 4);
        assert_eq!(buckets.total_deleted(), 4);
    }
}
