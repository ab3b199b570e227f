//! The three external-source façade stores (§4.H): Harvey, Copilot, and
//! Qualtrics. Each is independently locked; no cross-store atomicity is
//! required between them or with [`crate::store::Store`].

use cursor_sim_types::{CopilotUsageRow, ExportJob, FileBlob, HarveyEvent, JobStatus, NotFoundError, PeriodDays, Survey};
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
pub struct HarveyStore {
    events: RwLock<Vec<HarveyEvent>>,
}

impl HarveyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_event(&self, event: HarveyEvent) {
        self.events.write().expect("harvey store lock poisoned").push(event);
    }

    /// Time-filtered event list with optional user/task filters, ANDed
    /// (§4.H).
    pub fn list_events(
        &self,
        from: chrono::DateTime<chrono::Utc>,
        to: chrono::DateTime<chrono::Utc>,
        user_id: Option<&str>,
        task_name: Option<&str>,
    ) -> Vec<HarveyEvent> {
        let events = self.events.read().expect("harvey store lock poisoned");
        events
            .iter()
            .filter(|event| event.timestamp >= from && event.timestamp <= to)
            .filter(|event| user_id.is_none_or(|id| event.user_id == id))
            .filter(|event| task_name.is_none_or(|name| event.task_name == name))
            .cloned()
            .collect()
    }
}

#[derive(Default)]
pub struct CopilotStore {
    rows: RwLock<HashMap<(String, PeriodDays), CopilotUsageRow>>,
}

impl CopilotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&self, row: CopilotUsageRow) {
        let mut rows = self.rows.write().expect("copilot store lock poisoned");
        rows.insert((row.user_id.clone(), row.period), row);
    }

    /// `ALL` aliases to the 180-day cohort (§4.H).
    pub fn get_row(&self, user_id: &str, period: PeriodDays) -> Option<CopilotUsageRow> {
        let rows = self.rows.read().expect("copilot store lock poisoned");
        rows.get(&(user_id.to_string(), period)).cloned()
    }

    pub fn list_rows_for_period(&self, period: PeriodDays) -> Vec<CopilotUsageRow> {
        let rows = self.rows.read().expect("copilot store lock poisoned");
        rows.values().filter(|row| row.period == period).cloned().collect()
    }
}

#[derive(Default)]
pub struct QualtricsStore {
    surveys: RwLock<Vec<Survey>>,
    jobs: RwLock<HashMap<String, ExportJob>>,
    files: RwLock<HashMap<String, FileBlob>>,
}

impl QualtricsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_survey(&self, survey: Survey) {
        self.surveys.write().expect("qualtrics store lock poisoned").push(survey);
    }

    pub fn list_surveys(&self) -> Vec<Survey> {
        self.surveys.read().expect("qualtrics store lock poisoned").clone()
    }

    pub fn start_job(&self, job: ExportJob) {
        self.jobs
            .write()
            .expect("qualtrics store lock poisoned")
            .insert(job.progress_id.clone(), job);
    }

    pub fn advance_job(&self, progress_id: &str, status: JobStatus) -> Result<(), NotFoundError> {
        let mut jobs = self.jobs.write().expect("qualtrics store lock poisoned");
        let job = jobs
            .get_mut(progress_id)
            .ok_or_else(|| NotFoundError(format!("no export job {progress_id}")))?;
        job.status = status;
        Ok(())
    }

    /// Fetching an unknown progress id fails with `NotFoundError` (§4.H).
    pub fn get_job(&self, progress_id: &str) -> Result<ExportJob, NotFoundError> {
        let jobs = self.jobs.read().expect("qualtrics store lock poisoned");
        jobs.get(progress_id)
            .cloned()
            .ok_or_else(|| NotFoundError(format!("no export job {progress_id}")))
    }

    pub fn add_file(&self, file: FileBlob) {
        self.files
            .write()
            .expect("qualtrics store lock poisoned")
            .insert(file.file_id.clone(), file);
    }

    /// Fetching an unknown file id fails with `NotFoundError` (§4.H).
    pub fn get_file(&self, file_id: &str) -> Result<FileBlob, NotFoundError> {
        let files = self.files.read().expect("qualtrics store lock poisoned");
        files
            .get(file_id)
            .cloned()
            .ok_or_else(|| NotFoundError(format!("no export file {file_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn harvey_filters_are_anded() {
        let store = HarveyStore::new();
        let now = Utc::now();
        store.add_event(HarveyEvent {
            user_id: "user_a".into(),
            task_name: "contract_review".into(),
            timestamp: now,
            sentiment: 0.8,
        });
        store.add_event(HarveyEvent {
            user_id: "user_b".into(),
            task_name: "contract_review".into(),
            timestamp: now,
            sentiment: 0.2,
        });

        let matches = store.list_events(now - chrono::Duration::hours(1), now + chrono::Duration::hours(1), Some("user_a"), Some("contract_review"));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].user_id, "user_a");
    }

    #[test]
    fn copilot_all_alias_resolves_to_stored_180_day_row() {
        let store = CopilotStore::new();
        store.add_row(CopilotUsageRow {
            user_id: "user_a".into(),
            period: PeriodDays::OneEighty,
            suggestions_shown: 100,
            suggestions_accepted: 40,
            active_days: 20,
        });
        let resolved = store.get_row("user_a", PeriodDays::resolve_all_alias());
        assert!(resolved.is_some());
    }

    #[test]
    fn qualtrics_unknown_progress_id_is_not_found() {
        let store = QualtricsStore::new();
        assert!(store.get_job("missing").is_err());
    }

    #[test]
    fn qualtrics_job_progresses_through_states() {
        let store = QualtricsStore::new();
        store.start_job(ExportJob {
            progress_id: "job1".into(),
            survey_id: "survey1".into(),
            status: JobStatus::InProgress { percent_complete: 0 },
        });
        store
            .advance_job(
                "job1",
                JobStatus::Complete {
                    file_ids: vec!["file1".into()],
                    completed_at: Utc::now(),
                },
            )
            .expect("job exists");
        let job = store.get_job("job1").expect("job exists");
        assert!(matches!(job.status, JobStatus::Complete { .. }));
    }
}
