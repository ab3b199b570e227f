//! Event generators (§4.E): turn a seed plus a horizon into a causally
//! consistent corpus of commits, PRs, reviews, issues, and usage events.

pub mod commits;
pub mod issues;
pub mod pull_requests;
pub mod temporal;
pub mod usage;

use chrono::{DateTime, Utc};
use cursor_sim_distributions::SimRng;
use cursor_sim_types::{Commit, Developer, Issue, PullRequest, Repository, Review, Seed, UsageEvent};
use std::collections::HashMap;

/// The `[t_start, t_end]` window generation runs over (§4.E).
#[derive(Debug, Clone, Copy)]
pub struct Horizon {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Horizon {
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }
}

/// Tunables that bound a generation run beyond the seed itself: the horizon
/// and the per-developer commit cap (§4.E).
#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    pub horizon: Horizon,
    pub commit_cap_per_developer: u32,
}

/// Everything a generation run produces, ready to hand to the store by
/// value (§3.9: "generators produce entities by value and hand them off").
#[derive(Debug, Default)]
pub struct GeneratedCorpus {
    pub commits: Vec<Commit>,
    pub pull_requests: Vec<PullRequest>,
    pub reviews: Vec<Review>,
    pub issues: Vec<Issue>,
    pub usage_events: Vec<UsageEvent>,
}

/// Run the full event-generation pipeline (§4.E.1-§4.E.5) for one
/// replicated developer set against one repository set.
pub fn generate(
    seed: &Seed,
    developers: &[Developer],
    config: &GenerationConfig,
    rng: &mut SimRng,
) -> GeneratedCorpus {
    let mut corpus = GeneratedCorpus::default();

    if seed.repositories.is_empty() || developers.is_empty() {
        return corpus;
    }

    // Shared across every developer in the run so per-repo PR numbers stay
    // monotonic and collision-free across authors (§3.4, §8 invariant 4),
    // not just within one developer's own PRs.
    let mut next_pr_number_by_repo: HashMap<String, i64> = HashMap::new();

    for developer in developers {
        let mut dev_rng = rng.fork(hash_str(&developer.user_id));
        let instants = temporal::sample_horizon_instants(&mut dev_rng, developer, seed, &config.horizon);

        // PRs are synthesized before commits so each PR's `head_branch` is
        // known up front; `commits::synthesize_commits` then routes this
        // developer's non-senior commits onto those branches instead of a
        // single undifferentiated scratch branch, which is what makes the
        // back-reference attach below actually find matching commits.
        let (mut prs, reviews) = pull_requests::synthesize_pull_requests(
            &mut dev_rng,
            developer,
            developers,
            &seed.repositories,
            seed,
            &config.horizon,
            &mut next_pr_number_by_repo,
        );

        let pr_branches: Vec<commits::PrBranchTarget> = prs
            .iter()
            .map(|pr| commits::PrBranchTarget {
                repo_name: pr.repo_name.clone(),
                head_branch: pr.head_branch.clone(),
                target_commit_count: pr.commit_count.max(1) as u32,
            })
            .collect();

        let (commits, commits_by_branch) = commits::synthesize_commits(
            &mut dev_rng,
            developer,
            &seed.repositories,
            seed,
            &instants,
            config.commit_cap_per_developer,
            &pr_branches,
        );
        let base_offset = corpus.commits.len();
        corpus.commits.extend(commits);

        // Attach `pull_request_number` back-references (§3.3) to whichever
        // commits landed on each PR's head branch, and make `commit_count`
        // reflect the commits actually grouped onto that branch (§8) rather
        // than the sampled target passed to the commit router above.
        for pr in &mut prs {
            let key = (pr.repo_name.clone(), pr.head_branch.clone());
            if let Some(indices) = commits_by_branch.get(&key) {
                if !indices.is_empty() {
                    pr.commit_count = indices.len() as i64;
                }
                for &index in indices {
                    if let Some(commit) = corpus.commits.get_mut(base_offset + index) {
                        commit.pull_request_number = Some(pr.number);
                    }
                }
            }
        }

        corpus.pull_requests.extend(prs);
        corpus.reviews.extend(reviews);

        corpus
            .usage_events
            .extend(usage::synthesize_usage_events(&mut dev_rng, developer, &instants));
    }

    for repo in &seed.repositories {
        let mut repo_rng = rng.fork(hash_str(&repo.repo_name));
        corpus
            .issues
            .extend(issues::synthesize_issues(&mut repo_rng, repo, &config.horizon));
    }

    corpus
}

/// Weighted pick of a repo by team affiliation (§4.E.2): repos whose
/// `owning_teams` includes the developer's team are weighted higher.
pub(crate) fn pick_repo_index(
    rng: &mut SimRng,
    developer: &Developer,
    repos: &[Repository],
) -> Option<usize> {
    if repos.is_empty() {
        return None;
    }
    let weights: Vec<f64> = repos
        .iter()
        .map(|repo| {
            if repo.owning_teams.iter().any(|team| team == &developer.team) {
                5.0
            } else {
                1.0
            }
        })
        .collect();
    cursor_sim_distributions::weighted_choice(rng, &weights)
}

/// Deterministic 64-bit hash of a string, used both to fork per-entity PRNG
/// streams and as the basis of commit-hash rendering.
pub(crate) fn hash_str(value: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_sim_types::persona::{GaussianParams, PrBehavior, Seniority, WorkingHoursBand};
    use cursor_sim_types::repository::{CodeQualityBaseline, RepoMaturity};

    #[test]
    fn hash_str_is_deterministic() {
        assert_eq!(hash_str("user_alice"), hash_str("user_alice"));
        assert_ne!(hash_str("user_alice"), hash_str("user_bob"));
    }

    #[test]
    fn horizon_days_is_nonnegative() {
        let now = Utc::now();
        let horizon = Horizon { start: now, end: now - chrono::Duration::days(1) };
        assert_eq!(horizon.days(), 0);
    }

    fn developer(user_id: &str) -> Developer {
        Developer {
            user_id: user_id.into(),
            email: format!("{user_id}@acme.dev"),
            name: user_id.into(),
            org: "acme".into(),
            division: "eng".into(),
            team: "platform".into(),
            role: "ic".into(),
            region: "us".into(),
            timezone: "UTC".into(),
            locale: "en-US".into(),
            seniority: Seniority::Mid,
            activity_level: 0.9,
            acceptance_rate: 0.6,
            pr_behavior: PrBehavior {
                prs_per_week: 4.0,
                avg_loc: 150.0,
                avg_files: 4.0,
                thoroughness: 0.6,
                iteration_tolerance: 0.5,
            },
            coding_speed: GaussianParams { mean: 30.0, std_dev: 8.0 },
            preferred_models: vec![],
            chat_vs_code_ratio: 0.4,
            working_hours: WorkingHoursBand { start: 9, end: 17, peak: 12 },
        }
    }

    fn repo() -> Repository {
        Repository {
            repo_name: "acme/platform".into(),
            primary_language: "rust".into(),
            service_type: "backend".into(),
            default_branch: "main".into(),
            owning_teams: vec!["platform".into()],
            maturity: RepoMaturity { age_days: 400, total_commits: 1000, total_prs: 100, total_contributors: 5 },
            code_quality_baseline: CodeQualityBaseline {
                avg_file_age_days: 200.0,
                greenfield_file_ratio: 0.1,
                revert_rate_baseline: 0.03,
                hotfix_rate_baseline: 0.05,
            },
            common_file_patterns: vec!["**/*.rs".into()],
        }
    }

    #[test]
    fn multi_developer_generation_keeps_pr_numbers_unique_and_attaches_commits() {
        let mut seed = crate::seed_loader::template_seed();
        seed.repositories = vec![repo()];
        let developers = vec![developer("user_alice"), developer("user_bob"), developer("user_carol")];
        let config = GenerationConfig {
            horizon: Horizon {
                start: Utc::now() - chrono::Duration::days(60),
                end: Utc::now(),
            },
            commit_cap_per_developer: 200,
        };
        let mut rng = SimRng::from_seed(42);
        let corpus = generate(&seed, &developers, &config, &mut rng);

        // §3.4/§8 invariant 4: (repo_name, number) must be unique per repo
        // across every author, not just within one developer's own PRs.
        let mut keys: Vec<(String, i64)> =
            corpus.pull_requests.iter().map(|pr| (pr.repo_name.clone(), pr.number)).collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total, "PR (repo_name, number) pairs must be unique across developers");

        // At least one commit should have a real `pull_request_number`
        // back-reference now that PR head branches and commit branches
        // agree.
        assert!(corpus.commits.iter().any(|c| c.pull_request_number.is_some()));

        // `commit_count` must reflect the commits actually attributed to
        // that PR's number within its repo.
        for pr in &corpus.pull_requests {
            let attached = corpus
                .commits
                .iter()
                .filter(|c| c.repo_name == pr.repo_name && c.pull_request_number == Some(pr.number))
                .count();
            if attached > 0 {
                assert_eq!(pr.commit_count as usize, attached);
            }
        }
    }
}
