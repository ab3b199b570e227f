//! # cursor-sim
//!
//! A seed-driven synthetic data generator for a developer-productivity SaaS:
//! personas, commits, pull requests, reviews, issues, and usage telemetry,
//! queryable the way a real deployment's analytics API would be queried.
//!
//! ## Pipeline
//!
//! The core flow is **load → replicate → generate → query**:
//!
//! 1. [`seed_loader::load_from_path`] parses a JSON/YAML/CSV seed document
//!    and validates it.
//! 2. [`replicator::replicate`] stretches or samples the seed's developer
//!    list to an exact target headcount.
//! 3. [`generators::generate`] turns the replicated developers plus the
//!    seed's repositories into a causally consistent corpus of commits,
//!    PRs, reviews, issues, and usage events.
//! 4. [`query`] answers paginated, filtered, and derived-analytics questions
//!    against whatever corpus a [`Simulator`] is holding.
//!
//! [`regenerate::run`] re-runs steps 2-3 against a live [`Simulator`],
//! snapshotting stats before and after (§4.I).
//!
//! ## Modules
//!
//! - [`clock`] — the `Clock` seam used instead of ad hoc `Utc::now()`
//! - [`generators`] — event generation (§4.E)
//! - [`query`] — pagination, range/filter parsing, and analytics (§4.G)
//! - [`regenerate`] — admin regenerate (§4.I)
//! - [`replicator`] — persona replication (§4.C)
//! - [`reporter`] — the `GenerationReporter` progress trait
//! - [`seed_loader`] — seed parsing and validation (§4.B)

pub mod clock;
pub mod generators;
pub mod query;
pub mod regenerate;
pub mod replicator;
pub mod reporter;
pub mod seed_loader;

pub use cursor_sim_distributions as distributions;
pub use cursor_sim_store as store;
pub use cursor_sim_types as types;

use clock::{Clock, SystemClock};
use cursor_sim_store::external::{CopilotStore, HarveyStore, QualtricsStore};
use cursor_sim_store::Store;
use cursor_sim_types::{BootstrapError, InvalidTargetCount, Seed};
use generators::GenerationConfig;
use reporter::GenerationReporter;

/// The live facade: one seed, one store, the three external-source stores,
/// and the RNG seed that makes every generation run against it reproducible.
/// Owns everything a CLI or (out-of-scope) HTTP layer needs to answer
/// queries against a generated corpus.
pub struct Simulator {
    seed: Seed,
    rng_seed: u64,
    store: Store,
    harvey: HarveyStore,
    copilot: CopilotStore,
    qualtrics: QualtricsStore,
    clock: Box<dyn Clock>,
}

impl Simulator {
    /// Validate `seed`, replicate to `developer_count`, run the generators
    /// over `config`, and load the result into a fresh store.
    pub fn bootstrap(
        seed: Seed,
        rng_seed: u64,
        developer_count: i64,
        config: GenerationConfig,
        reporter: &mut dyn GenerationReporter,
    ) -> Result<Simulator, BootstrapError> {
        let store = Store::new();
        regenerate::bootstrap(&store, &seed, rng_seed, developer_count, &config, reporter)?;
        Ok(Simulator {
            seed,
            rng_seed,
            store,
            harvey: HarveyStore::new(),
            copilot: CopilotStore::new(),
            qualtrics: QualtricsStore::new(),
            clock: Box::new(SystemClock),
        })
    }

    /// Same as [`Simulator::bootstrap`] but with an explicit clock, for
    /// deterministic tests of anything that resolves "now".
    pub fn bootstrap_with_clock(
        seed: Seed,
        rng_seed: u64,
        developer_count: i64,
        config: GenerationConfig,
        reporter: &mut dyn GenerationReporter,
        clock: Box<dyn Clock>,
    ) -> Result<Simulator, BootstrapError> {
        let mut sim = Simulator::bootstrap(seed, rng_seed, developer_count, config, reporter)?;
        sim.clock = clock;
        Ok(sim)
    }

    /// Admin Regenerate (§4.I): clear and repopulate with a new developer
    /// count and/or horizon, returning `{before, after, delta}`.
    pub fn regenerate(
        &self,
        developer_count: i64,
        config: GenerationConfig,
        reporter: &mut dyn GenerationReporter,
    ) -> Result<regenerate::RegenerateReport, InvalidTargetCount> {
        regenerate::run(&self.store, &self.seed, self.rng_seed, developer_count, &config, reporter)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn harvey(&self) -> &HarveyStore {
        &self.harvey
    }

    pub fn copilot(&self) -> &CopilotStore {
        &self.copilot
    }

    pub fn qualtrics(&self) -> &QualtricsStore {
        &self.qualtrics
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use cursor_sim_types::persona::{GaussianParams, PrBehavior, Seniority, WorkingHoursBand};
    use cursor_sim_types::repository::{CodeQualityBaseline, RepoMaturity};
    use cursor_sim_types::{Developer, Repository};
    use generators::Horizon;
    use reporter::SilentReporter;

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
            activity_level: 0.5,
            acceptance_rate: 0.5,
            pr_behavior: PrBehavior {
                prs_per_week: 2.0,
                avg_loc: 100.0,
                avg_files: 3.0,
                thoroughness: 0.5,
                iteration_tolerance: 0.5,
            },
            coding_speed: GaussianParams { mean: 30.0, std_dev: 8.0 },
            preferred_models: vec![],
            chat_vs_code_ratio: 0.5,
            working_hours: WorkingHoursBand { start: 9, end: 17, peak: 11 },
        }
    }

    fn seed_with_one_repo() -> Seed {
        Seed {
            developers: vec![developer("user_alice")],
            repositories: vec![Repository {
                repo_name: "acme/platform".into(),
                primary_language: "rust".into(),
                service_type: "backend".into(),
                default_branch: "main".into(),
                owning_teams: vec!["platform".into()],
                maturity: RepoMaturity {
                    age_days: 400,
                    total_commits: 1000,
                    total_prs: 100,
                    total_contributors: 5,
                },
                code_quality_baseline: CodeQualityBaseline {
                    avg_file_age_days: 200.0,
                    greenfield_file_ratio: 0.1,
                    revert_rate_baseline: 0.03,
                    hotfix_rate_baseline: 0.05,
                },
                common_file_patterns: vec!["*.rs".into()],
            }],
            ..seed_loader::template_seed()
        }
    }

    fn config() -> GenerationConfig {
        let now = Utc::now();
        GenerationConfig {
            horizon: Horizon { start: now - Duration::days(14), end: now },
            commit_cap_per_developer: 50,
        }
    }

    #[test]
    fn bootstrap_populates_the_store_from_the_seed() {
        let mut reporter = SilentReporter;
        let sim = Simulator::bootstrap(seed_with_one_repo(), 7, 3, config(), &mut reporter)
            .expect("valid seed bootstraps");
        assert_eq!(sim.store().get_stats().developers, 3);
        assert_eq!(sim.seed().repositories.len(), 1);
    }

    #[test]
    fn regenerate_through_the_facade_changes_developer_count() {
        let mut reporter = SilentReporter;
        let sim = Simulator::bootstrap(seed_with_one_repo(), 7, 2, config(), &mut reporter)
            .expect("valid seed bootstraps");
        let report = sim
            .regenerate(5, config(), &mut reporter)
            .expect("valid target count");
        assert_eq!(report.before.developers, 2);
        assert_eq!(report.after.developers, 5);
        assert_eq!(sim.store().get_stats().developers, 5);
    }

    #[test]
    fn invalid_seed_fails_bootstrap_fast() {
        let mut reporter = SilentReporter;
        let mut seed = seed_with_one_repo();
        seed.developers.clear();
        let err = Simulator::bootstrap(seed, 7, 3, config(), &mut reporter);
        assert!(err.is_err());
    }
}
