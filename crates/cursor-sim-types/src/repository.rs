//! Repositories (§3.2).

use serde::{Deserialize, Serialize};

/// Age, size, and ownership facts about a repository.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RepoMaturity {
    pub age_days: u32,
    pub total_commits: u64,
    pub total_prs: u64,
    pub total_contributors: u32,
}

/// Baseline rates used by the survival/revert analytics of §4.G.3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CodeQualityBaseline {
    pub avg_file_age_days: f64,
    pub greenfield_file_ratio: f64,
    pub revert_rate_baseline: f64,
    pub hotfix_rate_baseline: f64,
}

/// A seeded repository (§3.2). `repo_name` is always `<owner>/<name>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub repo_name: String,
    pub primary_language: String,
    pub service_type: String,
    pub default_branch: String,
    pub owning_teams: Vec<String>,
    pub maturity: RepoMaturity,
    pub code_quality_baseline: CodeQualityBaseline,
    pub common_file_patterns: Vec<String>,
}

impl Repository {
    /// Split `owner/name` into its two halves. Returns `None` when the
    /// repo path is malformed (§4.G.3's `InvalidRepoPath`).
    pub fn split_owner_name(repo_name: &str) -> Option<(&str, &str)> {
        let mut parts = repo_name.splitn(2, '/');
        let owner = parts.next()?;
        let name = parts.next()?;
        if owner.is_empty() || name.is_empty() {
            return None;
        }
        Some((owner, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_owner_name_accepts_well_formed_paths() {
        assert_eq!(
            Repository::split_owner_name("acme/platform"),
            Some(("acme", "platform"))
        );
    }

    #[test]
    fn split_owner_name_rejects_missing_parts() {
        assert_eq!(Repository::split_owner_name("acme"), None);
        assert_eq!(Repository::split_owner_name("/platform"), None);
        assert_eq!(Repository::split_owner_name("acme/"), None);
    }
}
