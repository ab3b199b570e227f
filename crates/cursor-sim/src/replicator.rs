//! The persona replicator (§4.C): stretches or samples a seed's developer
//! list to an exact target count without ever mutating the seed itself.

use cursor_sim_distributions::{SimRng, sample_permutation};
use cursor_sim_types::{Developer, InvalidTargetCount};

/// Produce exactly `target_count` developers from `seed_developers`.
///
/// - `target_count <= seed_developers.len()`: a uniform-random sample (the
///   first `target_count` entries of a permutation).
/// - `target_count > seed_developers.len()`: cycle through the seed in
///   order; the first full cycle emits originals verbatim, later cycles
///   emit clones via [`Developer::as_clone`].
pub fn replicate(
    seed_developers: &[Developer],
    target_count: i64,
    rng: &mut SimRng,
) -> Result<Vec<Developer>, InvalidTargetCount> {
    if target_count < 1 {
        return Err(InvalidTargetCount::NonPositive(target_count));
    }
    if seed_developers.is_empty() {
        return Err(InvalidTargetCount::EmptySeed(target_count));
    }
    let target_count = target_count as usize;
    let seed_len = seed_developers.len();

    if target_count <= seed_len {
        let permutation = sample_permutation(rng, seed_len);
        return Ok(permutation[..target_count]
            .iter()
            .map(|&i| seed_developers[i].clone())
            .collect());
    }

    let mut result = Vec::with_capacity(target_count);
    let mut cycle_index: u32 = 0;
    'outer: loop {
        for developer in seed_developers {
            if result.len() == target_count {
                break 'outer;
            }
            if cycle_index == 0 {
                result.push(developer.clone());
            } else {
                result.push(developer.as_clone(cycle_index));
            }
        }
        cycle_index += 1;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_sim_types::persona::{GaussianParams, PrBehavior, Seniority, WorkingHoursBand};

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
            coding_speed: GaussianParams {
                mean: 30.0,
                std_dev: 8.0,
            },
            preferred_models: vec![],
            chat_vs_code_ratio: 0.5,
            working_hours: WorkingHoursBand {
                start: 9,
                end: 17,
                peak: 11,
            },
        }
    }

    #[test]
    fn zero_or_negative_target_is_rejected() {
        let seed = vec![developer("user_a")];
        let mut rng = SimRng::from_seed(1);
        assert!(matches!(
            replicate(&seed, 0, &mut rng),
            Err(InvalidTargetCount::NonPositive(0))
        ));
        assert!(matches!(
            replicate(&seed, -3, &mut rng),
            Err(InvalidTargetCount::NonPositive(-3))
        ));
    }

    #[test]
    fn empty_seed_is_rejected_regardless_of_target() {
        let mut rng = SimRng::from_seed(1);
        assert!(matches!(
            replicate(&[], 5, &mut rng),
            Err(InvalidTargetCount::EmptySeed(5))
        ));
    }

    #[test]
    fn sampling_down_produces_exactly_n_unique_ids() {
        let seed: Vec<Developer> = (0..10).map(|i| developer(&format!("user_{i}"))).collect();
        let mut rng = SimRng::from_seed(2);
        let result = replicate(&seed, 4, &mut rng).expect("valid");
        assert_eq!(result.len(), 4);
        let mut ids: Vec<&str> = result.iter().map(|d| d.user_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn cycling_up_preserves_originals_on_first_cycle_and_clones_after() {
        let seed = vec![developer("user_a"), developer("user_b")];
        let mut rng = SimRng::from_seed(3);
        let result = replicate(&seed, 5, &mut rng).expect("valid");
        assert_eq!(result.len(), 5);
        assert_eq!(result[0].user_id, "user_a");
        assert_eq!(result[1].user_id, "user_b");
        assert_eq!(result[2].user_id, "user_a_clone1");
        assert_eq!(result[3].user_id, "user_b_clone1");
        assert_eq!(result[4].user_id, "user_a_clone2");

        let mut ids: Vec<&str> = result.iter().map(|d| d.user_id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn seed_is_never_mutated() {
        let seed = vec![developer("user_a"), developer("user_b")];
        let snapshot = seed.clone();
        let mut rng = SimRng::from_seed(4);
        let _ = replicate(&seed, 7, &mut rng).expect("valid");
        assert_eq!(seed, snapshot);
    }
}
