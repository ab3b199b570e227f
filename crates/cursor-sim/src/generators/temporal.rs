//! Temporal shaping (§4.E.1): per persona, per day in the horizon, combine
//! region weekday/weekend weights with a working-hours envelope around
//! `peak` to produce an intraday intensity curve, then sample intra-day
//! instants via Poisson scaled by `activity_level`.

use super::Horizon;
use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc, Weekday};
use cursor_sim_distributions::{SimRng, sample_poisson, weighted_choice};
use cursor_sim_types::persona::WorkingHoursBand;
use cursor_sim_types::{Developer, Seed};

/// Baseline mean events/day before any modifiers, used when a seed's
/// correlations don't name a seniority-specific rate.
const DEFAULT_EVENTS_PER_DAY: f64 = 6.0;

fn is_weekend(date: DateTime<Utc>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Relative weight of `hour` within `band`: zero outside `[start, end]`,
/// peaking at `peak` with a triangular falloff elsewhere.
fn hourly_weight(hour: u8, band: &WorkingHoursBand) -> f64 {
    if hour < band.start || hour > band.end {
        return 0.0;
    }
    let spread = ((band.end - band.start) as f64 / 2.0).max(1.0);
    let distance = (hour as f64 - band.peak as f64).abs();
    (1.0 - (distance / (spread * 2.0))).max(0.05)
}

/// Sample every commit/review/usage instant for one developer across the
/// full horizon.
pub fn sample_horizon_instants(
    rng: &mut SimRng,
    developer: &Developer,
    seed: &Seed,
    horizon: &Horizon,
) -> Vec<DateTime<Utc>> {
    let region_activity = seed.correlations.region_activity.get(&developer.region);
    let mut instants = Vec::new();

    let day_count = horizon.days().max(0);
    for day_offset in 0..=day_count {
        let day_start = horizon.start + Duration::days(day_offset);
        let weekday_weight = region_activity.map(|r| r.weekday_weight).unwrap_or(1.0);
        let weekend_weight = region_activity.map(|r| r.weekend_weight).unwrap_or(0.3);
        let day_weight = if is_weekend(day_start) {
            weekend_weight
        } else {
            weekday_weight
        };

        let rate = DEFAULT_EVENTS_PER_DAY * developer.activity_level * day_weight;
        let count = sample_poisson(rng, rate);

        let hours: Vec<u8> = (0..24).collect();
        let weights: Vec<f64> = hours
            .iter()
            .map(|&h| hourly_weight(h, &developer.working_hours))
            .collect();

        for _ in 0..count {
            let Some(hour_index) = weighted_choice(rng, &weights) else {
                break;
            };
            let minute = rng.rng().random_range(0..60u32);
            let second = rng.rng().random_range(0..60u32);
            let instant = Utc
                .with_ymd_and_hms(
                    day_start.year(),
                    day_start.month(),
                    day_start.day(),
                    hours[hour_index] as u32,
                    minute,
                    second,
                )
                .single()
                .unwrap_or(day_start);
            if instant >= horizon.start && instant <= horizon.end {
                instants.push(instant);
            }
        }
    }

    instants.sort();
    instants
}

#[cfg(test)]
mod tests {
    use super::*;
    use cursor_sim_types::persona::{GaussianParams, PrBehavior, Seniority};

    fn developer() -> Developer {
        Developer {
            user_id: "user_alice".into(),
            email: "alice@acme.dev".into(),
            name: "Alice".into(),
            org: "acme".into(),
            division: "eng".into(),
            team: "platform".into(),
            role: "ic".into(),
            region: "us".into(),
            timezone: "UTC".into(),
            locale: "en-US".into(),
            seniority: Seniority::Senior,
            activity_level: 0.9,
            acceptance_rate: 0.6,
            pr_behavior: PrBehavior {
                prs_per_week: 3.0,
                avg_loc: 100.0,
                avg_files: 3.0,
                thoroughness: 0.7,
                iteration_tolerance: 0.5,
            },
            coding_speed: GaussianParams { mean: 30.0, std_dev: 8.0 },
            preferred_models: vec![],
            chat_vs_code_ratio: 0.5,
            working_hours: WorkingHoursBand { start: 9, end: 17, peak: 12 },
        }
    }

    fn seed() -> Seed {
        crate::seed_loader::template_seed()
    }

    #[test]
    fn hourly_weight_is_zero_outside_working_band() {
        let band = WorkingHoursBand { start: 9, end: 17, peak: 12 };
        assert_eq!(hourly_weight(8, &band), 0.0);
        assert_eq!(hourly_weight(18, &band), 0.0);
        assert!(hourly_weight(12, &band) > 0.0);
    }

    #[test]
    fn instants_fall_within_the_working_hours_band_and_horizon() {
        let mut rng = SimRng::from_seed(10);
        let dev = developer();
        let horizon = Horizon {
            start: Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 1, 12, 0, 0, 0).unwrap(),
        };
        let instants = sample_horizon_instants(&mut rng, &dev, &seed(), &horizon);
        for instant in &instants {
            assert!(*instant >= horizon.start && *instant <= horizon.end);
            let hour = instant.hour() as u8;
            assert!(hour >= dev.working_hours.start && hour <= dev.working_hours.end);
        }
    }

    #[test]
    fn same_seed_produces_same_instants() {
        let horizon = Horizon {
            start: Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2026, 1, 8, 0, 0, 0).unwrap(),
        };
        let mut rng_a = SimRng::from_seed(77);
        let mut rng_b = SimRng::from_seed(77);
        let dev = developer();
        let a = sample_horizon_instants(&mut rng_a, &dev, &seed(), &horizon);
        let b = sample_horizon_instants(&mut rng_b, &dev, &seed(), &horizon);
        assert_eq!(a, b);
    }
}
