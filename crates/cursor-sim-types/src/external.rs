//! External auxiliary datasets (§3.8): Harvey legal-assistant telemetry,
//! Copilot aggregate usage rows, and Qualtrics survey/export state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Harvey legal-assistant task event, with a sentiment score on the task
/// outcome (§3.8, §4.H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarveyEvent {
    pub user_id: String,
    pub task_name: String,
    pub timestamp: DateTime<Utc>,
    pub sentiment: f64,
}

/// The lookback window for a Copilot aggregate row. `All` is a query-time
/// alias for the 180-day cohort (§4.H), not a distinct stored period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodDays {
    Seven,
    Thirty,
    Ninety,
    OneEighty,
}

impl PeriodDays {
    /// Resolve the `ALL` query alias to its backing stored period.
    pub fn resolve_all_alias() -> PeriodDays {
        PeriodDays::OneEighty
    }

    pub fn as_days(self) -> u32 {
        match self {
            PeriodDays::Seven => 7,
            PeriodDays::Thirty => 30,
            PeriodDays::Ninety => 90,
            PeriodDays::OneEighty => 180,
        }
    }
}

/// A per-user Copilot aggregate row for one period (§3.8).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopilotUsageRow {
    pub user_id: String,
    pub period: PeriodDays,
    pub suggestions_shown: u64,
    pub suggestions_accepted: u64,
    pub active_days: u32,
}

/// Qualtrics survey metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub survey_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// State of an async export job: `InProgress(0) -> InProgress(k>0) ->
/// Complete | Failed` (§4.H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum JobStatus {
    InProgress { percent_complete: u8 },
    Complete {
        file_ids: Vec<String>,
        completed_at: DateTime<Utc>,
    },
    Failed { reason: String },
}

/// An export job, indexed by `progress_id` (§4.H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    pub progress_id: String,
    pub survey_id: String,
    pub status: JobStatus,
}

/// A generated export file blob, indexed by `file_id` (§4.H).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileBlob {
    pub file_id: String,
    pub survey_id: String,
    pub content: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_alias_resolves_to_one_eighty() {
        assert_eq!(PeriodDays::resolve_all_alias(), PeriodDays::OneEighty);
        assert_eq!(PeriodDays::resolve_all_alias().as_days(), 180);
    }

    #[test]
    fn job_status_serializes_with_tag() {
        let status = JobStatus::InProgress {
            percent_complete: 40,
        };
        let json = serde_json::to_string(&status).expect("serialize");
        assert!(json.contains("in_progress"));
    }
}
