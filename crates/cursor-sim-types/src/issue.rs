//! Issues (§3.6).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Open,
    Closed,
}

/// A repo-scoped issue (§3.6). `number` is unique within `repo_name`, not
/// globally — two different repos may both have issue number 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub repo_name: String,
    pub number: i64,
    pub title: String,
    pub body: String,
    pub state: IssueState,
    pub author_id: String,
    /// Label set; queries against this AND the requested labels together
    /// (§4.G.2), never OR.
    pub labels: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl Issue {
    /// True if `self.labels` contains every label in `wanted` (§4.G.2's
    /// ANDed label-filter semantics).
    pub fn matches_all_labels(&self, wanted: &BTreeSet<String>) -> bool {
        wanted.is_subset(&self.labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_all_labels_requires_every_wanted_label() {
        let issue = Issue {
            repo_name: "acme/platform".into(),
            number: 1,
            title: "t".into(),
            body: "".into(),
            state: IssueState::Open,
            author_id: "user_alice".into(),
            labels: labels(&["bug", "p1"]),
            created_at: Utc::now(),
            closed_at: None,
        };
        assert!(issue.matches_all_labels(&labels(&["bug"])));
        assert!(issue.matches_all_labels(&labels(&["bug", "p1"])));
        assert!(!issue.matches_all_labels(&labels(&["bug", "p2"])));
    }

    #[test]
    fn empty_wanted_set_always_matches() {
        let issue = Issue {
            repo_name: "acme/platform".into(),
            number: 2,
            title: "t".into(),
            body: "".into(),
            state: IssueState::Closed,
            author_id: "user_bob".into(),
            labels: BTreeSet::new(),
            created_at: Utc::now(),
            closed_at: Some(Utc::now()),
        };
        assert!(issue.matches_all_labels(&BTreeSet::new()));
    }
}
