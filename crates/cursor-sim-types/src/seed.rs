//! The seed model (§4.A): the fully-typed input document the loader parses
//! and the validator checks, and that the generators consume.

use crate::persona::{Developer, Seniority};
use crate::repository::Repository;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Text banks the generators draw from when synthesizing free-form content
/// (§4.A: "four commit-message classes, PR titles/descriptions, four
/// review-comment classes, five chat-prompt themes").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextTemplates {
    pub commit_message_classes: Vec<String>,
    pub pr_titles: Vec<String>,
    pub pr_descriptions: Vec<String>,
    pub review_comment_classes: Vec<String>,
    pub chat_prompt_themes: Vec<String>,
}

/// Weekday/weekend activity weights for one region, plus the hours of day
/// considered "peak" (§4.A, feeds §4.E.1's intraday intensity curve).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionActivity {
    pub weekday_weight: f64,
    pub weekend_weight: f64,
    pub peak_hours: Vec<u8>,
}

/// An AI-ratio classification band (§4.A: low ≤0.3, 0.3< medium ≤0.6, high
/// >0.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiRatioBand {
    Low,
    Medium,
    High,
}

impl AiRatioBand {
    /// Classify a ratio into its band per the §4.A thresholds.
    pub fn classify(ratio: f64) -> AiRatioBand {
        if ratio <= 0.3 {
            AiRatioBand::Low
        } else if ratio <= 0.6 {
            AiRatioBand::Medium
        } else {
            AiRatioBand::High
        }
    }
}

/// Cross-cutting behavioral correlations (§4.A): seniority→behavior
/// modifiers, region→activity weights, lines-per-change per event kind, and
/// AI-ratio band thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlations {
    pub seniority_behavior_modifiers: HashMap<Seniority, f64>,
    pub region_activity: HashMap<String, RegionActivity>,
    pub lines_per_change: HashMap<crate::commit::EventKind, GaussianCap>,
}

/// A gaussian draw with a hard upper cap (§4.E.2: "gaussian with `max` cap").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianCap {
    pub mean: f64,
    pub std_dev: f64,
    pub max: f64,
}

/// One named statistical distribution plus the parameters and per-dimension
/// modifiers applied to its base value (§4.A, §4.D's "multiplicative on the
/// base parameter" rule).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifiedDistribution {
    pub base_distribution: String,
    pub params: HashMap<String, f64>,
    pub modifiers_by_seniority: HashMap<Seniority, f64>,
    pub modifiers_by_pr_size: HashMap<String, f64>,
}

/// The three PR cycle-time stages (§4.E.3): coding→open, open→review,
/// review→merge lead times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleTimes {
    pub coding_lead_time: ModifiedDistribution,
    pub pickup_time: ModifiedDistribution,
    pub review_lead_time: ModifiedDistribution,
}

/// Review-pattern parameters (§4.A).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPatterns {
    pub comments_per_100_loc: f64,
    pub iteration_count: ModifiedDistribution,
    pub reviewer_count: ModifiedDistribution,
}

/// Quality-outcome probabilities and their modifier maps (§4.A, §4.E.3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityOutcomes {
    pub revert_probability_base: f64,
    pub hotfix_probability_base: f64,
    pub survival_30d_probability_base: f64,
    pub modifiers_by_seniority: HashMap<Seniority, f64>,
    pub modifiers_by_ai_ratio_band: HashMap<AiRatioBand, f64>,
    pub scope_creep_ratio: f64,
    pub rework_ratio: f64,
}

/// The PR lifecycle spec bundle (§4.A): everything the PR state machine
/// (§4.E.3) samples from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrLifecycle {
    pub cycle_times: CycleTimes,
    pub review_patterns: ReviewPatterns,
    pub quality_outcomes: QualityOutcomes,
    pub merge_probability: f64,
}

/// Harvey/Copilot/Qualtrics seed parameters (§3.8, optional: a seed with no
/// external-source block simply synthesizes nothing for those stores).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalDataSources {
    pub harvey_task_names: Vec<String>,
    pub copilot_enabled: bool,
    pub qualtrics_survey_names: Vec<String>,
}

/// The full seed document (§4.A): developers, repositories, text templates,
/// correlations, the PR lifecycle bundle, and optional external-source
/// config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub developers: Vec<Developer>,
    pub repositories: Vec<Repository>,
    pub text_templates: TextTemplates,
    pub correlations: Correlations,
    pub pr_lifecycle: PrLifecycle,
    #[serde(default)]
    pub external_data_sources: Option<ExternalDataSources>,
}
