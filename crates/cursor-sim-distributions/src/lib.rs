//! Seedable statistical primitives (§4.D): lognormal, truncated gaussian,
//! Poisson, geometric, weighted categorical, and permutation sampling, plus
//! the multiplicative modifier-composition rule the generators apply before
//! drawing from any of them.

mod rng;

pub use rng::SimRng;

use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Geometric, LogNormal, Normal, Poisson};

/// Compose a base parameter with a set of modifier factors. §4.D: "a base
/// value `b` is multiplied by the product of applicable modifier factors
/// ... the composition rule is multiplicative on the base parameter."
pub fn apply_modifiers(base: f64, factors: impl IntoIterator<Item = f64>) -> f64 {
    factors.into_iter().fold(base, |acc, factor| acc * factor)
}

/// Draw from a lognormal distribution parameterized by the mean and std dev
/// of the underlying normal. Falls back to `0.0` if the parameters are
/// degenerate (std dev `<= 0`), which only happens with a malformed seed.
pub fn sample_lognormal(rng: &mut SimRng, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return mean.exp();
    }
    LogNormal::new(mean, std_dev)
        .map(|dist| dist.sample(rng.rng()))
        .unwrap_or(0.0)
}

/// Draw from a normal distribution truncated to `[min, max]` by rejection
/// sampling, bounded to a handful of attempts before clamping so a narrow
/// window can't spin forever.
pub fn sample_truncated_gaussian(rng: &mut SimRng, mean: f64, std_dev: f64, min: f64, max: f64) -> f64 {
    let Ok(normal) = Normal::new(mean, std_dev.max(f64::EPSILON)) else {
        return mean.clamp(min, max);
    };
    for _ in 0..32 {
        let value = normal.sample(rng.rng());
        if value >= min && value <= max {
            return value;
        }
    }
    normal.sample(rng.rng()).clamp(min, max)
}

/// Draw from a normal distribution and cap the result at `max` (§4.E.2:
/// "gaussian with `max` cap"), flooring at zero since these feed LOC counts.
pub fn sample_gaussian_capped(rng: &mut SimRng, mean: f64, std_dev: f64, max: f64) -> f64 {
    let Ok(normal) = Normal::new(mean, std_dev.max(f64::EPSILON)) else {
        return mean.clamp(0.0, max);
    };
    normal.sample(rng.rng()).clamp(0.0, max)
}

/// Draw a Poisson count with the given rate. A non-positive rate always
/// yields zero events.
pub fn sample_poisson(rng: &mut SimRng, lambda: f64) -> u64 {
    if lambda <= 0.0 {
        return 0;
    }
    Poisson::new(lambda)
        .map(|dist| dist.sample(rng.rng()) as u64)
        .unwrap_or(0)
}

/// Draw a geometric count (number of failures before the first success)
/// with success probability `p`.
pub fn sample_geometric(rng: &mut SimRng, p: f64) -> u64 {
    let p = p.clamp(f64::EPSILON, 1.0);
    Geometric::new(p)
        .map(|dist| dist.sample(rng.rng()))
        .unwrap_or(0)
}

/// Bernoulli trial with success probability `p`.
pub fn sample_bernoulli(rng: &mut SimRng, p: f64) -> bool {
    rng.rng().random_bool(p.clamp(0.0, 1.0))
}

/// Pick one index from `weights` with probability proportional to its
/// weight. Returns `None` only when `weights` is empty or every weight is
/// non-positive.
pub fn weighted_choice(rng: &mut SimRng, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    let mut target = rng.rng().random::<f64>() * total;
    for (index, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        if target < *weight {
            return Some(index);
        }
        target -= *weight;
    }
    weights.iter().rposition(|w| *w > 0.0)
}

/// Fisher-Yates permutation of `0..n`.
pub fn sample_permutation(rng: &mut SimRng, n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng.rng());
    indices
}

/// Sample `k` distinct indices from `0..n` without replacement, via a
/// partial Fisher-Yates over a permutation (§4.E.3's reviewer sampling).
/// `k` is clamped to `n`.
pub fn sample_without_replacement(rng: &mut SimRng, n: usize, k: usize) -> Vec<usize> {
    let permutation = sample_permutation(rng, n);
    permutation.into_iter().take(k.min(n)).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_modifiers_multiplies_in_sequence() {
        let result = apply_modifiers(100.0, [0.7, 1.5]);
        assert!((result - 105.0).abs() < 1e-9);
    }

    #[test]
    fn apply_modifiers_with_no_factors_is_identity() {
        assert_eq!(apply_modifiers(42.0, []), 42.0);
    }

    #[test]
    fn gaussian_capped_never_exceeds_max_or_drops_below_zero() {
        let mut rng = SimRng::from_seed(1);
        for _ in 0..500 {
            let value = sample_gaussian_capped(&mut rng, 50.0, 100.0, 80.0);
            assert!((0.0..=80.0).contains(&value));
        }
    }

    #[test]
    fn truncated_gaussian_stays_within_bounds() {
        let mut rng = SimRng::from_seed(2);
        for _ in 0..500 {
            let value = sample_truncated_gaussian(&mut rng, 10.0, 3.0, 5.0, 15.0);
            assert!((5.0..=15.0).contains(&value));
        }
    }

    #[test]
    fn poisson_with_nonpositive_rate_is_always_zero() {
        let mut rng = SimRng::from_seed(3);
        for _ in 0..50 {
            assert_eq!(sample_poisson(&mut rng, 0.0), 0);
            assert_eq!(sample_poisson(&mut rng, -1.0), 0);
        }
    }

    #[test]
    fn weighted_choice_never_picks_a_zero_weight_item() {
        let mut rng = SimRng::from_seed(4);
        let weights = [0.0, 1.0, 0.0, 2.0];
        for _ in 0..200 {
            let picked = weighted_choice(&mut rng, &weights).expect("some weight is positive");
            assert!(weights[picked] > 0.0);
        }
    }

    #[test]
    fn weighted_choice_on_all_zero_weights_is_none() {
        let mut rng = SimRng::from_seed(5);
        assert_eq!(weighted_choice(&mut rng, &[0.0, 0.0]), None);
        assert_eq!(weighted_choice(&mut rng, &[]), None);
    }

    #[test]
    fn permutation_is_a_bijection_over_0_to_n() {
        let mut rng = SimRng::from_seed(6);
        let mut perm = sample_permutation(&mut rng, 20);
        perm.sort_unstable();
        assert_eq!(perm, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn without_replacement_returns_distinct_indices_clamped_to_n() {
        let mut rng = SimRng::from_seed(7);
        let picked = sample_without_replacement(&mut rng, 5, 20);
        assert_eq!(picked.len(), 5);
        let mut sorted = picked.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), picked.len());
    }

    #[test]
    fn same_seed_yields_same_samples_across_primitives() {
        let mut a = SimRng::from_seed(99);
        let mut b = SimRng::from_seed(99);
        assert_eq!(sample_poisson(&mut a, 5.0), sample_poisson(&mut b, 5.0));
        assert_eq!(
            sample_permutation(&mut a, 10),
            sample_permutation(&mut b, 10)
        );
    }
}
