//! Commit synthesis (§4.E.2): roll sampled instants into per-(day,branch)
//! groupings and emit one content-addressed [`Commit`] per group.

use super::hash_str;
use chrono::{DateTime, Datelike, Utc};
use cursor_sim_distributions::{SimRng, sample_gaussian_capped, weighted_choice};
use cursor_sim_types::commit::{Commit, EventKind, LineBuckets};
use cursor_sim_types::{Developer, Repository, Seed};
use std::collections::HashMap;

/// `(repo index, branch name)` for one commit group, keyed by calendar day.
type GroupKey = (u32, i64, String);

/// One of this developer's in-flight PR branches, so non-senior commits can
/// be routed onto the same branch name the PR synthesizer assigned as
/// `head_branch` (§4.E.2/§4.E.3: commits must land on a PR's actual head
/// branch for the `pull_request_number` back-reference wiring in
/// `generators::generate` to find them).
pub struct PrBranchTarget {
    pub repo_name: String,
    pub head_branch: String,
    pub target_commit_count: u32,
}

/// Synthesize this developer's commits for the horizon. Returns the commits
/// plus, for each produced commit, the `(repo_name, branch_name)` it landed
/// on, so the PR synthesizer can later attach `pull_request_number`
/// back-references to the right commits.
pub fn synthesize_commits(
    rng: &mut SimRng,
    developer: &Developer,
    repos: &[Repository],
    seed: &Seed,
    instants: &[DateTime<Utc>],
    commit_cap: u32,
    pr_branches: &[PrBranchTarget],
) -> (Vec<Commit>, HashMap<(String, String), Vec<usize>>) {
    let mut groups: HashMap<GroupKey, LineBuckets> = HashMap::new();
    let mut group_order: Vec<GroupKey> = Vec::new();
    let mut group_timestamps: HashMap<GroupKey, DateTime<Utc>> = HashMap::new();
    let mut group_repo: HashMap<GroupKey, usize> = HashMap::new();
    let mut emitted = 0u32;

    // Remaining capacity per PR branch target, so a branch stops accepting
    // commits once it has reached the PR's sampled `commit_count`; any
    // commit that has no PR branch with capacity left falls back to a
    // developer-scoped scratch branch instead.
    let mut remaining: HashMap<(String, String), u32> = pr_branches
        .iter()
        .map(|target| {
            (
                (target.repo_name.clone(), target.head_branch.clone()),
                target.target_commit_count.max(1),
            )
        })
        .collect();

    for &instant in instants {
        if emitted >= commit_cap {
            break;
        }
        let Some(repo_index) = super::pick_repo_index(rng, developer, repos) else {
            continue;
        };
        let repo = &repos[repo_index];

        let kind = pick_event_kind(rng, developer);
        let cap = seed
            .correlations
            .lines_per_change
            .get(&kind)
            .copied()
            .unwrap_or(cursor_sim_types::seed::GaussianCap { mean: 30.0, std_dev: 15.0, max: 300.0 });
        let added = sample_gaussian_capped(rng, cap.mean, cap.std_dev, cap.max) as u64;
        let deleted = sample_gaussian_capped(rng, cap.mean * 0.4, cap.std_dev * 0.4, cap.max) as u64;

        let branch_name = if developer.seniority == cursor_sim_types::Seniority::Senior {
            repo.default_branch.clone()
        } else {
            let target = pr_branches.iter().find(|target| {
                target.repo_name == repo.repo_name
                    && remaining
                        .get(&(target.repo_name.clone(), target.head_branch.clone()))
                        .copied()
                        .unwrap_or(0)
                        > 0
            });
            match target {
                Some(target) => {
                    let key = (target.repo_name.clone(), target.head_branch.clone());
                    if let Some(slot) = remaining.get_mut(&key) {
                        *slot -= 1;
                    }
                    target.head_branch.clone()
                }
                None => format!("{}/feature", developer.user_id),
            }
        };

        let key: GroupKey = (repo_index as u32, instant.num_days_from_ce() as i64, branch_name);
        groups.entry(key.clone()).or_insert_with(|| {
            group_order.push(key.clone());
            group_timestamps.insert(key.clone(), instant);
            group_repo.insert(key.clone(), repo_index);
            LineBuckets::default()
        });
        groups.get_mut(&key).unwrap().accumulate(kind, added, deleted);
        emitted += 1;
    }

    let mut commits = Vec::with_capacity(group_order.len());
    let mut by_repo_branch: HashMap<(String, String), Vec<usize>> = HashMap::new();

    for (seq, key) in group_order.into_iter().enumerate() {
        let (repo_index, _day, branch_name) = key.clone();
        let repo = &repos[repo_index as usize];
        let lines = groups.remove(&key).unwrap_or_default();
        let commit_ts = *group_timestamps.get(&key).unwrap();

        let commit_hash = format!(
            "{:016x}{:08x}",
            hash_str(&format!("{}:{}:{}:{}", developer.user_id, repo.repo_name, branch_name, commit_ts)),
            seq
        );

        let commit = Commit {
            commit_hash,
            user_id: developer.user_id.clone(),
            user_email: developer.email.clone(),
            user_name: developer.name.clone(),
            repo_name: repo.repo_name.clone(),
            branch_name: branch_name.clone(),
            is_primary_branch: branch_name == repo.default_branch,
            lines,
            commit_ts,
            pull_request_number: None,
        };

        by_repo_branch
            .entry((repo.repo_name.clone(), branch_name))
            .or_default()
            .push(commits.len());
        commits.push(commit);
    }

    (commits, by_repo_branch)
}

/// Pick an event kind by `chat_vs_code_ratio`: higher ratios favor
/// `Composer` over `Tab`/`NonAi` (§4.E.2).
fn pick_event_kind(rng: &mut SimRng, developer: &Developer) -> EventKind {
    let composer_weight = developer.chat_vs_code_ratio;
    let tab_weight = (1.0 - developer.chat_vs_code_ratio) * 0.6;
    let non_ai_weight = (1.0 - developer.chat_vs_code_ratio) * 0.4;
    let weights = [tab_weight, composer_weight, non_ai_weight];
    match weighted_choice(rng, &weights) {
        Some(0) => EventKind::Tab,
        Some(1) => EventKind::Composer,
        _ => EventKind::NonAi,
    }
}
