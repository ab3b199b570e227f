//! Admin Regenerate (§4.I): snapshot stats, clear the store, and re-run the
//! replicator + generators with a new developer count and/or horizon.

use crate::generators::{self, GenerationConfig};
use crate::reporter::GenerationReporter;
use crate::{replicator, seed_loader};
use cursor_sim_distributions::SimRng;
use cursor_sim_store::{Stats, Store};
use cursor_sim_types::{InvalidTargetCount, Seed};

/// `{before, after, delta}` of a regenerate run (§4.I.4), `delta` always
/// `after - before` field-wise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegenerateReport {
    pub before: Stats,
    pub after: Stats,
    pub delta: Stats,
}

/// Re-populate `store` in place from `seed` with a new `developer_count` and
/// `config`, reusing `rng_seed` for determinism (§4.E.6).
///
/// The store is observable only in its pre-clear or post-generate state to a
/// reader that happens to take the lock between steps here: `clear_all_data`
/// leaves it at an all-zero snapshot, which is one of the two states §4.I
/// allows, rather than a half-populated one (no reader can observe a
/// generation run in progress, since nothing is written back to `store`
/// until generation has finished building the full corpus in memory).
pub fn run(
    store: &Store,
    seed: &Seed,
    rng_seed: u64,
    developer_count: i64,
    config: &GenerationConfig,
    reporter: &mut dyn GenerationReporter,
) -> Result<RegenerateReport, InvalidTargetCount> {
    let before = store.get_stats();
    reporter.info(&format!(
        "regenerating: clearing {} developers, {} commits, {} PRs",
        before.developers, before.commits, before.pull_requests
    ));

    let mut rng = SimRng::from_seed(rng_seed);
    let developers = replicator::replicate(&seed.developers, developer_count, &mut rng)?;
    let corpus = generators::generate(seed, &developers, config, &mut rng);

    store.clear_all_data();
    store.load_developers(developers);
    for commit in corpus.commits {
        store.add_commit(commit);
    }
    for pr in corpus.pull_requests {
        store.upsert_pr(pr);
    }
    for review in corpus.reviews {
        store.store_review(review);
    }
    for issue in corpus.issues {
        store.store_issue(issue);
    }
    for event in corpus.usage_events {
        store.add_usage_event(event);
    }

    let after = store.get_stats();
    reporter.info(&format!(
        "regenerate complete: {} developers, {} commits, {} PRs",
        after.developers, after.commits, after.pull_requests
    ));

    Ok(RegenerateReport {
        before,
        after,
        delta: after - before,
    })
}

/// Load `seed`'s validated corpus into a freshly-created, empty `store`
/// (§4.B bootstrap followed immediately by §4.E generation).
pub fn bootstrap(
    store: &Store,
    seed: &Seed,
    rng_seed: u64,
    developer_count: i64,
    config: &GenerationConfig,
    reporter: &mut dyn GenerationReporter,
) -> Result<(), cursor_sim_types::BootstrapError> {
    seed_loader::validate(seed)?;
    let mut rng = SimRng::from_seed(rng_seed);
    let developers = replicator::replicate(&seed.developers, developer_count, &mut rng)?;
    reporter.info(&format!("replicated {} developers from seed", developers.len()));

    let corpus = generators::generate(seed, &developers, config, &mut rng);
    reporter.info(&format!(
        "generated {} commits, {} PRs, {} reviews, {} issues, {} usage events",
        corpus.commits.len(),
        corpus.pull_requests.len(),
        corpus.reviews.len(),
        corpus.issues.len(),
        corpus.usage_events.len(),
    ));

    store.load_developers(developers);
    for commit in corpus.commits {
        store.add_commit(commit);
    }
    for pr in corpus.pull_requests {
        store.upsert_pr(pr);
    }
    for review in corpus.reviews {
        store.store_review(review);
    }
    for issue in corpus.issues {
        store.store_issue(issue);
    }
    for event in corpus.usage_events {
        store.add_usage_event(event);
    }
    Ok(())
}
