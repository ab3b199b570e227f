//! Derived analytics (§4.G.3): PR cycle-time, review quality, code-survival
//! cohort analysis, and revert analysis. Each function takes already
//! range-filtered slices — callers apply [`super::filters`] and
//! [`super::pagination`] before reaching here — and every one returns an
//! all-zero report on empty input rather than erroring (§7, §8 invariant 9).

use chrono::{DateTime, Duration, Utc};
use cursor_sim_distributions::apply_modifiers;
use cursor_sim_types::persona::Seniority;
use cursor_sim_types::review::{Review, ReviewState};
use cursor_sim_types::seed::QualityOutcomes;
use cursor_sim_types::{Commit, PullRequest};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Linear-interpolated percentile over an already-sorted sample (§4.G.3:
/// "linear interpolation between adjacent sorted samples"; a single sample
/// reports that value for every percentile).
fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// PR cycle-time analytics (§4.G.3). All durations are seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PrCycleTimeReport {
    pub total_prs_analyzed: u64,
    pub avg_time_to_merge_seconds: f64,
    pub median_time_to_merge_seconds: f64,
    pub p50_time_to_merge_seconds: f64,
    pub p75_time_to_merge_seconds: f64,
    pub p90_time_to_merge_seconds: f64,
    pub avg_time_to_first_review_seconds: f64,
}

/// Compute cycle-time statistics over PRs already filtered to `state=merged`
/// and a merge-date range. Empty input yields all zeros (§4.G.3, §8
/// invariant 9).
pub fn pr_cycle_time(merged_prs: &[PullRequest]) -> PrCycleTimeReport {
    let mut merge_seconds = Vec::with_capacity(merged_prs.len());
    let mut review_seconds_sum = 0.0;
    let mut analyzed = 0u64;

    for pr in merged_prs {
        let Some(merged_at) = pr.merged_at else { continue };
        merge_seconds.push((merged_at - pr.created_at).num_seconds() as f64);
        let time_to_first_review = pr
            .first_review_at
            .map(|at| (at - pr.created_at).num_seconds() as f64)
            .unwrap_or(0.0);
        review_seconds_sum += time_to_first_review;
        analyzed += 1;
    }

    if analyzed == 0 {
        return PrCycleTimeReport::default();
    }

    let mut sorted = merge_seconds.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("durations are never NaN"));
    let avg = merge_seconds.iter().sum::<f64>() / analyzed as f64;

    PrCycleTimeReport {
        total_prs_analyzed: analyzed,
        avg_time_to_merge_seconds: avg,
        median_time_to_merge_seconds: percentile(&sorted, 50.0),
        p50_time_to_merge_seconds: percentile(&sorted, 50.0),
        p75_time_to_merge_seconds: percentile(&sorted, 75.0),
        p90_time_to_merge_seconds: percentile(&sorted, 90.0),
        avg_time_to_first_review_seconds: review_seconds_sum / analyzed as f64,
    }
}

/// Review-quality analytics (§4.G.3).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewQualityReport {
    pub total_prs_analyzed: u64,
    pub approval_rate: f64,
    pub changes_requested_rate: f64,
    pub pending_rate: f64,
    pub avg_comments_per_review: f64,
    pub avg_distinct_reviewers_per_pr: f64,
}

/// Compute review-quality statistics over merged PRs in range, given a way
/// to fetch each PR's reviews (ordinarily [`cursor_sim_store::Store::get_reviews_by_pr_id`]).
pub fn review_quality(
    merged_prs: &[PullRequest],
    reviews_for: impl Fn(i64) -> Vec<Review>,
) -> ReviewQualityReport {
    if merged_prs.is_empty() {
        return ReviewQualityReport::default();
    }

    let mut approved = 0u64;
    let mut changes_requested = 0u64;
    let mut pending = 0u64;
    let mut total_reviews = 0u64;
    let mut comment_total = 0u64;
    let mut distinct_reviewer_total = 0u64;

    for pr in merged_prs {
        let reviews = reviews_for(pr.id);
        let mut distinct: BTreeSet<String> = BTreeSet::new();
        for review in &reviews {
            total_reviews += 1;
            comment_total += review.comment_count() as u64;
            distinct.insert(review.reviewer.clone());
            match review.state {
                ReviewState::Approved => approved += 1,
                ReviewState::ChangesRequested => changes_requested += 1,
                ReviewState::Pending => pending += 1,
            }
        }
        distinct_reviewer_total += distinct.len() as u64;
    }

    let total_prs = merged_prs.len() as u64;
    let rate = |count: u64| if total_reviews == 0 { 0.0 } else { count as f64 / total_reviews as f64 };

    ReviewQualityReport {
        total_prs_analyzed: total_prs,
        approval_rate: rate(approved),
        changes_requested_rate: rate(changes_requested),
        pending_rate: rate(pending),
        avg_comments_per_review: if total_reviews == 0 {
            0.0
        } else {
            comment_total as f64 / total_reviews as f64
        },
        avg_distinct_reviewers_per_pr: distinct_reviewer_total as f64 / total_prs as f64,
    }
}

/// Per-developer slice of a [`SurvivalReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeveloperSurvival {
    pub user_id: String,
    pub lines_added: u64,
    pub survival_rate: f64,
}

/// Code-survival cohort analytics (§4.G.3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurvivalReport {
    pub survival_rate: f64,
    pub total_lines_added: u64,
    pub by_developer: Vec<DeveloperSurvival>,
}

/// Estimate the fraction of lines added by `cohort_commits` still present at
/// `observation_date`, assuming independent per-line geometric decay keyed
/// by `code_survival_30d` with per-seniority/AI-ratio modifiers
/// (GLOSSARY, §4.G.3). `cohort_commits` must already be filtered to one
/// repo and `[cohort_start, cohort_end]`.
pub fn survival_cohort(
    cohort_commits: &[Commit],
    observation_date: DateTime<Utc>,
    quality: &QualityOutcomes,
    seniority_of: impl Fn(&str) -> Option<Seniority>,
) -> SurvivalReport {
    let mut total_lines = 0u64;
    let mut weighted_survival_sum = 0.0;
    let mut by_dev: HashMap<String, (u64, f64)> = HashMap::new();

    for commit in cohort_commits {
        let added = commit.lines.total_added();
        if added == 0 {
            continue;
        }
        let age_days = (observation_date - commit.commit_ts).num_seconds().max(0) as f64 / 86_400.0;

        let seniority_modifier = seniority_of(&commit.user_id)
            .and_then(|seniority| quality.modifiers_by_seniority.get(&seniority).copied())
            .unwrap_or(1.0);
        let ai_band = cursor_sim_types::AiRatioBand::classify(commit.lines.ai_ratio());
        let ai_modifier = quality.modifiers_by_ai_ratio_band.get(&ai_band).copied().unwrap_or(1.0);

        let base = apply_modifiers(quality.survival_30d_probability_base, [seniority_modifier, ai_modifier]).clamp(0.0, 1.0);
        let daily_decay = if base <= 0.0 { 0.0 } else { base.powf(1.0 / 30.0) };
        let survival = daily_decay.powf(age_days);

        total_lines += added;
        weighted_survival_sum += survival * added as f64;
        let entry = by_dev.entry(commit.user_id.clone()).or_insert((0, 0.0));
        entry.0 += added;
        entry.1 += survival * added as f64;
    }

    if total_lines == 0 {
        return SurvivalReport::default();
    }

    let mut by_developer: Vec<DeveloperSurvival> = by_dev
        .into_iter()
        .map(|(user_id, (lines_added, weighted))| DeveloperSurvival {
            user_id,
            lines_added,
            survival_rate: if lines_added == 0 { 0.0 } else { weighted / lines_added as f64 },
        })
        .collect();
    by_developer.sort_by(|a, b| a.user_id.cmp(&b.user_id));

    SurvivalReport {
        survival_rate: weighted_survival_sum / total_lines as f64,
        total_lines_added: total_lines,
        by_developer,
    }
}

/// One reverted PR's synthetic revert timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevertRecord {
    pub repo_name: String,
    pub number: i64,
    pub merged_at: DateTime<Utc>,
    pub reverted_at: DateTime<Utc>,
    pub days_to_revert: f64,
}

/// Revert analytics (§4.G.3).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevertReport {
    pub total_merged: u64,
    pub reverted_count: u64,
    pub revert_rate: f64,
    pub reverts: Vec<RevertRecord>,
}

/// Derive a stable value in `[0, 1)` from a string key, used to place a
/// `was_reverted` PR's synthetic revert date deterministically within its
/// window (no revert timestamp is stored on [`PullRequest`] itself — §3.4
/// only stores the boolean).
fn deterministic_fraction(key: &str) -> f64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish() as f64 / u64::MAX as f64
}

/// Compute revert analytics over merged PRs already filtered to one repo
/// and `[since, until]` (§4.G.3). `was_reverted` PRs get a synthetic revert
/// date placed deterministically within `window_days` of `merged_at`.
pub fn revert_analysis(merged_prs: &[PullRequest], window_days: u32) -> RevertReport {
    let total_merged = merged_prs.len() as u64;
    let window_days = window_days.max(1) as f64;

    let mut reverts = Vec::new();
    for pr in merged_prs {
        if !pr.was_reverted {
            continue;
        }
        let Some(merged_at) = pr.merged_at else { continue };
        let fraction = deterministic_fraction(&format!("{}#{}", pr.repo_name, pr.number));
        let days_to_revert = (fraction * window_days).max(1.0 / 24.0);
        let reverted_at = merged_at + Duration::seconds((days_to_revert * 86_400.0) as i64);
        reverts.push(RevertRecord {
            repo_name: pr.repo_name.clone(),
            number: pr.number,
            merged_at,
            reverted_at,
            days_to_revert,
        });
    }

    let reverted_count = reverts.len() as u64;
    RevertReport {
        total_merged,
        reverted_count,
        revert_rate: if total_merged == 0 {
            0.0
        } else {
            reverted_count as f64 / total_merged as f64
        },
        reverts,
    }
}
