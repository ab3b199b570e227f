//! Issue synthesis (§4.E.4): independently per repo, Poisson-distributed
//! issue counts scaled by repo age and contributor count, with maturity-
//! scaled closure probability and weighted multi-label selection.

use super::Horizon;
use chrono::Duration;
use cursor_sim_distributions::{SimRng, sample_bernoulli, sample_poisson, weighted_choice};
use cursor_sim_types::issue::{Issue, IssueState};
use cursor_sim_types::Repository;

const LABEL_VOCABULARY: &[&str] = &["bug", "enhancement", "docs", "p0", "p1", "p2", "good-first-issue"];
const LABEL_WEIGHTS: &[f64] = &[3.0, 2.5, 1.0, 0.5, 1.5, 2.0, 0.8];

pub fn synthesize_issues(rng: &mut SimRng, repo: &Repository, horizon: &Horizon) -> Vec<Issue> {
    let rate = (repo.maturity.age_days as f64 / 30.0) * (repo.maturity.total_contributors as f64).max(1.0) * 0.2;
    let count = sample_poisson(rng, rate);
    let closure_probability = (repo.maturity.age_days as f64 / 1000.0).clamp(0.1, 0.9);

    let mut issues = Vec::with_capacity(count as usize);
    for number in 1..=count as i64 {
        let created_offset_days = (rng.rng().random::<f64>() * horizon.days().max(1) as f64) as i64;
        let created_at = horizon.start + Duration::days(created_offset_days);
        let is_closed = sample_bernoulli(rng, closure_probability);
        let closed_at = if is_closed {
            Some(created_at + Duration::days(1 + (rng.rng().random::<f64>() * 14.0) as i64))
        } else {
            None
        };

        let label_count = 1 + (rng.rng().random::<f64>() * 2.0) as usize;
        let mut labels = std::collections::BTreeSet::new();
        let mut remaining_weights = LABEL_WEIGHTS.to_vec();
        for _ in 0..label_count {
            let Some(index) = weighted_choice(rng, &remaining_weights) else {
                break;
            };
            labels.insert(LABEL_VOCABULARY[index].to_string());
            remaining_weights[index] = 0.0;
        }

        issues.push(Issue {
            repo_name: repo.repo_name.clone(),
            number,
            title: format!("Issue #{number}"),
            body: String::new(),
            state: if is_closed { IssueState::Closed } else { IssueState::Open },
            author_id: String::new(),
            labels,
            created_at,
            closed_at,
        });
    }
    issues
}
