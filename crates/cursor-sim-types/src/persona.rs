//! Developer personas: the seeded identities that drive synthesis (§3.1).

use serde::{Deserialize, Serialize};

/// Seniority band. Drives cycle-time, AI-ratio, and review-thoroughness
/// modifiers throughout the generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
}

/// Gaussian parameters used for coding speed and similar per-persona rates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianParams {
    pub mean: f64,
    pub std_dev: f64,
}

/// A persona's pull-request behavior profile (§3.1).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrBehavior {
    pub prs_per_week: f64,
    pub avg_loc: f64,
    pub avg_files: f64,
    pub thoroughness: f64,
    pub iteration_tolerance: f64,
}

/// Working-hours band: bounds plus the peak hour used to shape the intraday
/// intensity curve (§4.E.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHoursBand {
    pub start: u8,
    pub end: u8,
    pub peak: u8,
}

/// A seeded developer profile (§3.1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Developer {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub org: String,
    pub division: String,
    pub team: String,
    pub role: String,
    pub region: String,
    pub timezone: String,
    pub locale: String,
    pub seniority: Seniority,
    pub activity_level: f64,
    pub acceptance_rate: f64,
    pub pr_behavior: PrBehavior,
    pub coding_speed: GaussianParams,
    pub preferred_models: Vec<String>,
    pub chat_vs_code_ratio: f64,
    pub working_hours: WorkingHoursBand,
}

impl Developer {
    /// Clone this developer as a replicator clone (§4.C): `user_id` and
    /// `email` are rewritten, `name` gets a `(Clone N)` suffix, every other
    /// field is inherited verbatim.
    pub fn as_clone(&self, cycle_index: u32) -> Developer {
        Developer {
            user_id: format!("{}_clone{}", self.user_id, cycle_index),
            email: format!("clone{}_{}", cycle_index, self.email),
            name: format!("{} (Clone {})", self.name, cycle_index),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Developer {
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
            activity_level: 0.8,
            acceptance_rate: 0.6,
            pr_behavior: PrBehavior {
                prs_per_week: 3.0,
                avg_loc: 120.0,
                avg_files: 4.0,
                thoroughness: 0.7,
                iteration_tolerance: 0.5,
            },
            coding_speed: GaussianParams {
                mean: 40.0,
                std_dev: 10.0,
            },
            preferred_models: vec!["gpt-5".into()],
            chat_vs_code_ratio: 0.4,
            working_hours: WorkingHoursBand {
                start: 9,
                end: 18,
                peak: 11,
            },
        }
    }

    #[test]
    fn as_clone_rewrites_identity_and_keeps_the_rest() {
        let alice = sample();
        let clone = alice.as_clone(1);

        assert_eq!(clone.user_id, "user_alice_clone1");
        assert_eq!(clone.email, "clone1_alice@acme.dev");
        assert_eq!(clone.name, "Alice (Clone 1)");
        assert_eq!(clone.seniority, alice.seniority);
        assert_eq!(clone.pr_behavior, alice.pr_behavior);
    }

    #[test]
    fn json_roundtrip_preserves_fields() {
        let alice = sample();
        let json = serde_json::to_string(&alice).expect("serialize");
        let back: Developer = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, alice);
    }
}
