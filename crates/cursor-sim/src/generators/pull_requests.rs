//! PR synthesis (§4.E.3): the state machine
//! `CODING -> OPEN -> REVIEW -> MERGED` or `-> CLOSED`, plus the reviews each
//! merged/closed PR accumulates along the way.
//!
//! `id`/`number` assignment is deferred to the store (§9 open question):
//! this generator emits PRs with `id = 0` and lets `Store::upsert_pr` assign
//! the globally-monotonic id, and `number = 0` is never produced here —
//! instead the caller threads one `next_number_by_repo` counter across every
//! developer in the run (§3.4/§8 invariant 4: `(repo_name, number)` must be
//! unique and monotonic per repo, not just within one developer's PRs), so
//! the numbers it hands out are already correct by the time the store sees
//! them, since a full regenerate starts from an empty store and numbers
//! must be contiguous from 1 even before any store call.

use super::Horizon;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use cursor_sim_distributions::{
    SimRng, apply_modifiers, sample_bernoulli, sample_gaussian_capped, sample_poisson,
    sample_without_replacement,
};
use cursor_sim_types::pull_request::{PrSizeBand, PrState, PullRequest};
use cursor_sim_types::review::{Review, ReviewComment, ReviewState};
use cursor_sim_types::{Developer, Repository, Seed};
use std::collections::HashMap;

fn size_band(avg_pr_size_loc: f64) -> PrSizeBand {
    if avg_pr_size_loc < 50.0 {
        PrSizeBand::Small
    } else if avg_pr_size_loc < 400.0 {
        PrSizeBand::Medium
    } else {
        PrSizeBand::Large
    }
}

fn seniority_modifier(seed: &Seed, seniority: cursor_sim_types::Seniority) -> f64 {
    seed.correlations
        .seniority_behavior_modifiers
        .get(&seniority)
        .copied()
        .unwrap_or(1.0)
}

/// A PR's iteration count is sampled from the seed's `iteration_count`
/// distribution without an upper bound per §4.E.3, but a pathological seed
/// (an unreasonably large `mean`) could otherwise blow up generation time;
/// this bounds the worst case rather than silently diverging from whatever
/// the seed specifies for realistic inputs.
const MAX_REVIEW_ITERATIONS: i64 = 12;

/// Synthesize this developer's PRs for the horizon, targeting a Poisson
/// count around `pr_behavior.prs_per_week` scaled by the horizon length.
/// `next_number_by_repo` is shared across every developer in the generation
/// run so per-repo PR numbers stay monotonic and collision-free across
/// authors (§3.4, §8 invariant 4), not just within one developer's PRs.
/// Returns the PRs and their reviews; commit back-references are attached
/// by the caller once `commits::synthesize_commits` has routed commits onto
/// each PR's `head_branch`.
pub fn synthesize_pull_requests(
    rng: &mut SimRng,
    developer: &Developer,
    teammates: &[Developer],
    repos: &[Repository],
    seed: &Seed,
    horizon: &Horizon,
    next_number_by_repo: &mut HashMap<String, i64>,
) -> (Vec<PullRequest>, Vec<Review>) {
    let weeks = (horizon.days() as f64 / 7.0).max(1.0 / 7.0);
    let expected = developer.pr_behavior.prs_per_week * weeks;
    let count = sample_poisson(rng, expected);

    let mut prs = Vec::new();
    let mut reviews = Vec::new();

    for _ in 0..count {
        let Some(repo_index) = super::pick_repo_index(rng, developer, repos) else {
            continue;
        };
        let repo = &repos[repo_index];
        let band = size_band(developer.pr_behavior.avg_loc);
        let modifier = seniority_modifier(seed, developer.seniority);

        let first_commit_at = random_instant_in_horizon(rng, horizon);
        let coding_lead_hours = sample_gaussian_capped(rng, 8.0, 4.0, 72.0);
        let created_at = first_commit_at + ChronoDuration::minutes((apply_modifiers(coding_lead_hours, [modifier]) * 60.0) as i64);

        let pickup_hours = sample_gaussian_capped(rng, 4.0, 3.0, 48.0);
        let first_review_at = created_at + ChronoDuration::minutes((apply_modifiers(pickup_hours, [modifier]) * 60.0) as i64);

        let review_lead_hours = sample_gaussian_capped(rng, 6.0, 4.0, 96.0);
        let merged_at_candidate = first_review_at + ChronoDuration::minutes((apply_modifiers(review_lead_hours, [modifier]) * 60.0) as i64);

        let merges = sample_bernoulli(rng, seed.pr_lifecycle.merge_probability);

        let additions = sample_gaussian_capped(rng, developer.pr_behavior.avg_loc, developer.pr_behavior.avg_loc * 0.5, developer.pr_behavior.avg_loc * 4.0).max(1.0) as i64;
        let deletions = sample_gaussian_capped(rng, developer.pr_behavior.avg_loc * 0.3, developer.pr_behavior.avg_loc * 0.2, developer.pr_behavior.avg_loc * 2.0) as i64;
        let changed_files = sample_gaussian_capped(rng, developer.pr_behavior.avg_files, developer.pr_behavior.avg_files * 0.5, developer.pr_behavior.avg_files * 5.0).max(1.0) as i64;

        let ai_ratio = (developer.chat_vs_code_ratio * apply_modifiers(1.0, [modifier])).clamp(0.0, 1.0);
        let tab_lines = (additions as f64 * ai_ratio * 0.5) as i64;

        let revert_probability = apply_modifiers(
            seed.pr_lifecycle.quality_outcomes.revert_probability_base,
            [modifier],
        );
        let was_reverted = merges && sample_bernoulli(rng, revert_probability);
        let is_bug_fix = sample_bernoulli(rng, seed.pr_lifecycle.quality_outcomes.hotfix_probability_base);

        let number = {
            let entry = next_number_by_repo.entry(repo.repo_name.clone()).or_insert(1);
            let assigned = *entry;
            *entry += 1;
            assigned
        };

        let branch_name = format!("{}/feature-{}", developer.user_id, number);

        // §4.E.3: "commit_count drawn from the rework/scope-creep ratios".
        // This is the target the caller asks `commits::synthesize_commits`
        // to route onto this PR's `head_branch`; once that routing runs,
        // the caller overwrites this with the actual number of commits that
        // landed on the branch (§8: `commit_count` must reflect reality).
        let quality = &seed.pr_lifecycle.quality_outcomes;
        let commit_count_base = 1.0 + quality.rework_ratio * 3.0 + quality.scope_creep_ratio * 2.0;
        let commit_count = sample_poisson(rng, commit_count_base).max(1) as i64;

        let reviewer_pool: Vec<&Developer> = teammates
            .iter()
            .filter(|t| t.team == developer.team && t.user_id != developer.user_id)
            .collect();
        let reviewer_target = sample_poisson(rng, seed.pr_lifecycle.review_patterns.reviewer_count.params.get("mean").copied().unwrap_or(1.5)).max(1) as usize;
        let reviewer_indices = sample_without_replacement(rng, reviewer_pool.len(), reviewer_target.min(reviewer_pool.len().max(1)));
        let reviewers: Vec<String> = reviewer_indices.iter().filter_map(|&i| reviewer_pool.get(i)).map(|d| d.email.clone()).collect();

        let (state, merged_at, closed_at) = if merges {
            (PrState::Merged, Some(merged_at_candidate), None)
        } else {
            (PrState::Closed, None, Some(merged_at_candidate))
        };

        let pr = PullRequest {
            id: 0,
            repo_name: repo.repo_name.clone(),
            number,
            state,
            author_id: developer.user_id.clone(),
            author_email: developer.email.clone(),
            author_name: developer.name.clone(),
            title: format!("{} #{}", if is_bug_fix { "Fix" } else { "Add" }, number),
            body: String::new(),
            base_branch: repo.default_branch.clone(),
            head_branch: branch_name,
            additions,
            deletions,
            changed_files,
            ai_ratio,
            tab_lines,
            was_reverted,
            is_bug_fix,
            created_at,
            first_commit_at,
            first_review_at: Some(first_review_at),
            last_commit_at: Some(first_commit_at),
            merged_at,
            closed_at,
            reviewers: reviewers.clone(),
            commit_count,
        };

        let iterations = sample_poisson(
            rng,
            seed.pr_lifecycle.review_patterns.iteration_count.params.get("mean").copied().unwrap_or(1.0),
        )
        .max(1)
        .min(MAX_REVIEW_ITERATIONS);
        let comments_base = seed.pr_lifecycle.review_patterns.comments_per_100_loc * (additions as f64 / 100.0);

        for (review_index, reviewer_email) in reviewers.iter().enumerate() {
            for iteration in 0..iterations {
                let is_last = iteration + 1 == iterations && review_index + 1 == reviewers.len();
                let review_state = if is_last && developer.pr_behavior.thoroughness > 0.5 {
                    ReviewState::Approved
                } else if sample_bernoulli(rng, 1.0 - developer.pr_behavior.thoroughness) {
                    ReviewState::ChangesRequested
                } else {
                    ReviewState::Approved
                };
                let comment_count = sample_gaussian_capped(rng, comments_base.max(0.5), comments_base.max(0.5) * 0.5, comments_base.max(1.0) * 3.0) as usize;
                reviews.push(Review {
                    id: 0,
                    pr_id: 0,
                    reviewer: reviewer_email.clone(),
                    state: review_state,
                    body: String::new(),
                    submitted_at: first_review_at + ChronoDuration::hours(iteration as i64),
                    comments: (0..comment_count).map(|_| ReviewComment { body: String::new() }).collect(),
                });
            }
        }

        prs.push(pr);
    }

    (prs, reviews)
}

fn random_instant_in_horizon(rng: &mut SimRng, horizon: &Horizon) -> DateTime<Utc> {
    let span_seconds = (horizon.end - horizon.start).num_seconds().max(1);
    let offset = (rng.rng().random::<f64>() * span_seconds as f64) as i64;
    horizon.start + ChronoDuration::seconds(offset)
}
