//! The indexed in-memory store (§4.F): every persona, commit, PR, review,
//! issue, and usage event produced by a generation run, held behind one
//! reader-writer lock so `Regenerate` can treat a whole rebuild as a single
//! write-side transaction (§4.I, §9).

use crate::indexes::{CommitIndex, IssueIndex, PersonaIndex, PrIndex, ReviewIndex, UsageIndex};
use crate::stats::Stats;
use cursor_sim_types::{
    AskModeEvent, ClientVersionEvent, CommandEvent, Commit, Developer, FileExtensionEvent, Issue,
    IssueState, McpToolEvent, ModelUsageEvent, NotFoundError, PlanEvent, PullRequest, Review,
    UsageEvent,
};
use std::sync::RwLock;

#[derive(Default)]
struct StoreData {
    personas: PersonaIndex,
    commits: CommitIndex,
    prs: PrIndex,
    reviews: ReviewIndex,
    issues: IssueIndex,
    usage: UsageIndex,
}

impl StoreData {
    fn new() -> Self {
        StoreData {
            prs: PrIndex::new(),
            reviews: ReviewIndex::new(),
            ..Default::default()
        }
    }
}

pub struct Store {
    data: RwLock<StoreData>,
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Store {
            data: RwLock::new(StoreData::new()),
        }
    }

    // -- Personas ---------------------------------------------------------

    /// Bulk-load the persona index for a generation run. Replaces whatever
    /// personas were previously loaded.
    pub fn load_developers(&self, developers: Vec<Developer>) {
        let mut data = self.data.write().expect("store lock poisoned");
        data.personas.load(developers);
    }

    pub fn get_developer_by_user_id(&self, user_id: &str) -> Option<Developer> {
        let data = self.data.read().expect("store lock poisoned");
        data.personas.by_user_id.get(user_id).cloned()
    }

    pub fn get_developer_by_email(&self, email: &str) -> Option<Developer> {
        let data = self.data.read().expect("store lock poisoned");
        data.personas.get_by_email(email).cloned()
    }

    /// Personas sorted ascending by `user_id` for deterministic ordering
    /// (§4.F).
    pub fn list_developers(&self) -> Vec<Developer> {
        let data = self.data.read().expect("store lock poisoned");
        let mut developers: Vec<Developer> = data.personas.by_user_id.values().cloned().collect();
        developers.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        developers
    }

    // -- Commits ------------------------------------------------------------

    pub fn add_commit(&self, commit: Commit) {
        let mut data = self.data.write().expect("store lock poisoned");
        data.commits.push(commit);
    }

    pub fn get_commit_by_hash(&self, hash: &str) -> Option<Commit> {
        let data = self.data.read().expect("store lock poisoned");
        data.commits
            .by_hash
            .get(hash)
            .map(|&index| data.commits.append_buffer[index].clone())
    }

    /// Lazily sorts the append-buffer on first query, then binary-searches
    /// the start index and streams until `commit_ts` exceeds `to` (§4.F).
    pub fn get_commits_by_time_range(
        &self,
        from: chrono::DateTime<chrono::Utc>,
        to: chrono::DateTime<chrono::Utc>,
    ) -> Vec<Commit> {
        {
            let mut data = self.data.write().expect("store lock poisoned");
            data.commits.resort();
        }
        let data = self.data.read().expect("store lock poisoned");
        let sorted = &data.commits.sorted;
        let start = sorted.partition_point(|commit| commit.commit_ts < from);
        sorted[start..]
            .iter()
            .take_while(|commit| commit.commit_ts <= to)
            .cloned()
            .collect()
    }

    pub fn get_commits_by_user(&self, user_id: &str) -> Vec<Commit> {
        let data = self.data.read().expect("store lock poisoned");
        data.commits
            .by_user
            .get(user_id)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| data.commits.append_buffer[i].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get_commits_by_repo(&self, repo_name: &str) -> Vec<Commit> {
        let data = self.data.read().expect("store lock poisoned");
        data.commits
            .by_repo
            .get(repo_name)
            .map(|indices| {
                indices
                    .iter()
                    .map(|&i| data.commits.append_buffer[i].clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    // -- Pull requests --------------------------------------------------------

    /// Insert or update a PR by id (§9 open question): a zero id means
    /// "assign the next one", any other id updates in place if present or
    /// inserts at that id otherwise. Returns the id the PR was stored under.
    pub fn upsert_pr(&self, mut pr: PullRequest) -> i64 {
        let mut data = self.data.write().expect("store lock poisoned");
        if pr.id == 0 {
            pr.id = data.prs.next_pr_id;
            data.prs.next_pr_id += 1;
        } else if pr.id >= data.prs.next_pr_id {
            data.prs.next_pr_id = pr.id + 1;
        }
        let id = pr.id;
        data.prs.insert(pr);
        id
    }

    /// `AddPR` (§4.F): always assigns a fresh id.
    pub fn add_pr(&self, mut pr: PullRequest) -> i64 {
        pr.id = 0;
        self.upsert_pr(pr)
    }

    /// `UpdatePR` (§4.F): requires the `(repo, number)` to already exist.
    pub fn update_pr(
        &self,
        repo_name: &str,
        number: i64,
        pr: PullRequest,
    ) -> Result<(), NotFoundError> {
        let mut data = self.data.write().expect("store lock poisoned");
        let existing_id = data
            .prs
            .by_repo
            .get(repo_name)
            .and_then(|by_number| by_number.get(&number))
            .copied()
            .ok_or_else(|| {
                NotFoundError(format!("no PR {repo_name}#{number}"))
            })?;
        let mut updated = pr;
        updated.id = existing_id;
        data.prs.insert(updated);
        Ok(())
    }

    pub fn get_pr_by_id(&self, id: i64) -> Option<PullRequest> {
        let data = self.data.read().expect("store lock poisoned");
        data.prs.by_id.get(&id).cloned()
    }

    pub fn get_pr_by_repo_number(&self, repo_name: &str, number: i64) -> Option<PullRequest> {
        let data = self.data.read().expect("store lock poisoned");
        let id = data.prs.by_repo.get(repo_name)?.get(&number).copied()?;
        data.prs.by_id.get(&id).cloned()
    }

    pub fn list_prs_by_repo(&self, repo_name: &str) -> Vec<PullRequest> {
        let data = self.data.read().expect("store lock poisoned");
        data.prs
            .by_repo
            .get(repo_name)
            .map(|by_number| {
                by_number
                    .values()
                    .filter_map(|id| data.prs.by_id.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn list_prs_by_author_id(&self, author_id: &str) -> Vec<PullRequest> {
        let data = self.data.read().expect("store lock poisoned");
        data.prs
            .by_author_id
            .get(author_id)
            .map(|ids| ids.iter().filter_map(|id| data.prs.by_id.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    pub fn list_prs_by_author_email(&self, author_email: &str) -> Vec<PullRequest> {
        let data = self.data.read().expect("store lock poisoned");
        data.prs
            .by_author_email
            .get(author_email)
            .map(|ids| ids.iter().filter_map(|id| data.prs.by_id.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    /// `max(existing numbers)+1`, or `1` when the repo has no PRs (§4.F, §8
    /// invariant 4).
    pub fn get_next_pr_number(&self, repo_name: &str) -> i64 {
        let data = self.data.read().expect("store lock poisoned");
        data.prs
            .by_repo
            .get(repo_name)
            .and_then(|by_number| by_number.keys().next_back())
            .map(|&max| max + 1)
            .unwrap_or(1)
    }

    // -- Reviews ------------------------------------------------------------

    pub fn store_review(&self, mut review: Review) -> i64 {
        let mut data = self.data.write().expect("store lock poisoned");
        if review.id == 0 {
            review.id = data.reviews.next_review_id;
            data.reviews.next_review_id += 1;
        } else if review.id >= data.reviews.next_review_id {
            data.reviews.next_review_id = review.id + 1;
        }
        let id = review.id;
        data.reviews.insert(review);
        id
    }

    pub fn get_review_by_id(&self, id: i64) -> Option<Review> {
        let data = self.data.read().expect("store lock poisoned");
        data.reviews.by_id.get(&id).cloned()
    }

    pub fn get_reviews_by_pr_id(&self, pr_id: i64) -> Vec<Review> {
        let data = self.data.read().expect("store lock poisoned");
        data.reviews
            .by_pr_id
            .get(&pr_id)
            .map(|ids| ids.iter().filter_map(|id| data.reviews.by_id.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    pub fn get_reviews_by_reviewer_email(&self, email: &str) -> Vec<Review> {
        let data = self.data.read().expect("store lock poisoned");
        data.reviews
            .by_reviewer_email
            .get(email)
            .map(|ids| ids.iter().filter_map(|id| data.reviews.by_id.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    // -- Issues ---------------------------------------------------------------

    pub fn store_issue(&self, issue: Issue) {
        let mut data = self.data.write().expect("store lock poisoned");
        data.issues.insert(issue);
    }

    pub fn get_issue(&self, repo_name: &str, number: i64) -> Option<Issue> {
        let data = self.data.read().expect("store lock poisoned");
        data.issues.by_repo.get(repo_name)?.get(&number).cloned()
    }

    pub fn list_issues_by_repo(&self, repo_name: &str) -> Vec<Issue> {
        let data = self.data.read().expect("store lock poisoned");
        data.issues
            .by_repo
            .get(repo_name)
            .map(|by_number| by_number.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn list_issues_by_repo_state(&self, repo_name: &str, state: IssueState) -> Vec<Issue> {
        let data = self.data.read().expect("store lock poisoned");
        let Some(by_number) = data.issues.by_repo.get(repo_name) else {
            return Vec::new();
        };
        data.issues
            .by_repo_state
            .get(repo_name)
            .and_then(|by_state| by_state.get(&state))
            .map(|numbers| numbers.iter().filter_map(|n| by_number.get(n).cloned()).collect())
            .unwrap_or_default()
    }

    // -- Usage events -----------------------------------------------------

    pub fn add_model_usage_event(&self, event: ModelUsageEvent) {
        self.data.write().expect("store lock poisoned").usage.model_usage.push(event);
    }

    pub fn add_client_version_event(&self, event: ClientVersionEvent) {
        self.data
            .write()
            .expect("store lock poisoned")
            .usage
            .client_version
            .push(event);
    }

    pub fn add_file_extension_event(&self, event: FileExtensionEvent) {
        self.data
            .write()
            .expect("store lock poisoned")
            .usage
            .file_extension
            .push(event);
    }

    pub fn add_mcp_tool_event(&self, event: McpToolEvent) {
        self.data.write().expect("store lock poisoned").usage.mcp_tool.push(event);
    }

    pub fn add_command_event(&self, event: CommandEvent) {
        self.data.write().expect("store lock poisoned").usage.command.push(event);
    }

    pub fn add_plan_event(&self, event: PlanEvent) {
        self.data.write().expect("store lock poisoned").usage.plan.push(event);
    }

    pub fn add_ask_mode_event(&self, event: AskModeEvent) {
        self.data.write().expect("store lock poisoned").usage.ask_mode.push(event);
    }

    /// Dispatch a tagged [`UsageEvent`] to its per-kind append list.
    pub fn add_usage_event(&self, event: UsageEvent) {
        match event {
            UsageEvent::ModelUsage(e) => self.add_model_usage_event(e),
            UsageEvent::ClientVersion(e) => self.add_client_version_event(e),
            UsageEvent::FileExtension(e) => self.add_file_extension_event(e),
            UsageEvent::McpTool(e) => self.add_mcp_tool_event(e),
            UsageEvent::Command(e) => self.add_command_event(e),
            UsageEvent::Plan(e) => self.add_plan_event(e),
            UsageEvent::AskMode(e) => self.add_ask_mode_event(e),
        }
    }

    // -- Whole-corpus operations --------------------------------------------

    /// Union of repo names appearing in the PR or issue indexes (§4.F).
    pub fn list_repositories(&self) -> Vec<String> {
        let data = self.data.read().expect("store lock poisoned");
        let mut names: std::collections::BTreeSet<String> = data.prs.by_repo.keys().cloned().collect();
        names.extend(data.issues.by_repo.keys().cloned());
        names.into_iter().collect()
    }

    pub fn get_stats(&self) -> Stats {
        let data = self.data.read().expect("store lock poisoned");
        Stats {
            developers: data.personas.by_user_id.len() as u64,
            commits: data.commits.append_buffer.len() as u64,
            pull_requests: data.prs.by_id.len() as u64,
            reviews: data.reviews.by_id.len() as u64,
            issues: data.issues.by_repo.values().map(|m| m.len()).sum::<usize>() as u64,
            model_usage_events: data.usage.model_usage.len() as u64,
            client_version_events: data.usage.client_version.len() as u64,
            file_extension_events: data.usage.file_extension.len() as u64,
            mcp_tool_events: data.usage.mcp_tool.len() as u64,
            command_events: data.usage.command.len() as u64,
            plan_events: data.usage.plan.len() as u64,
            ask_mode_events: data.usage.ask_mode.len() as u64,
        }
    }

    /// Atomically re-initialize every index, reset `next_pr_id`/
    /// `next_review_id` to 1, and clear `needs_sort` (§4.F, §9 "ClearAllData
    /// re-initializes every index and resets the PR id counter to 1").
    pub fn clear_all_data(&self) {
        let mut data = self.data.write().expect("store lock poisoned");
        *data = StoreData::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use cursor_sim_types::{LineBuckets, PrState};

    fn sample_commit(hash: &str, repo: &str, user: &str, ts: chrono::DateTime<chrono::Utc>) -> Commit {
        Commit {
            commit_hash: hash.into(),
            user_id: user.into(),
            user_email: format!("{user}@acme.dev"),
            user_name: user.into(),
            repo_name: repo.into(),
            branch_name: "main".into(),
            is_primary_branch: true,
            lines: LineBuckets::default(),
            commit_ts: ts,
            pull_request_number: None,
        }
    }

    fn sample_pr(repo: &str, id: i64, number: i64) -> PullRequest {
        let now = Utc::now();
        PullRequest {
            id,
            repo_name: repo.into(),
            number,
            state: PrState::Open,
            author_id: "user_alice".into(),
            author_email: "alice@acme.dev".into(),
            author_name: "Alice".into(),
            title: "t".into(),
            body: "".into(),
            base_branch: "main".into(),
            head_branch: "feature".into(),
            additions: 1,
            deletions: 0,
            changed_files: 1,
            ai_ratio: 0.0,
            tab_lines: 0,
            was_reverted: false,
            is_bug_fix: false,
            created_at: now,
            first_commit_at: now,
            first_review_at: None,
            last_commit_at: None,
            merged_at: None,
            closed_at: None,
            reviewers: vec![],
            commit_count: 1,
        }
    }

    #[test]
    fn get_next_pr_number_is_one_when_empty_and_max_plus_one_otherwise() {
        let store = Store::new();
        assert_eq!(store.get_next_pr_number("acme/platform"), 1);
        store.upsert_pr(sample_pr("acme/platform", 0, 1));
        store.upsert_pr(sample_pr("acme/platform", 0, 2));
        assert_eq!(store.get_next_pr_number("acme/platform"), 3);
    }

    #[test]
    fn add_pr_always_assigns_a_fresh_id_even_if_caller_set_one() {
        let store = Store::new();
        let first = store.add_pr(sample_pr("acme/platform", 99, 1));
        let second = store.add_pr(sample_pr("acme/platform", 99, 2));
        assert_ne!(first, second);
    }

    #[test]
    fn update_pr_requires_existing_repo_number() {
        let store = Store::new();
        let err = store.update_pr("acme/platform", 1, sample_pr("acme/platform", 0, 1));
        assert!(err.is_err());

        store.upsert_pr(sample_pr("acme/platform", 0, 1));
        let mut updated = sample_pr("acme/platform", 0, 1);
        updated.title = "renamed".into();
        assert!(store.update_pr("acme/platform", 1, updated).is_ok());
        assert_eq!(store.get_pr_by_repo_number("acme/platform", 1).unwrap().title, "renamed");
    }

    #[test]
    fn commits_by_time_range_returns_ascending_inclusive_window() {
        let store = Store::new();
        let base = Utc::now();
        store.add_commit(sample_commit("h3", "r", "u", base + Duration::hours(3)));
        store.add_commit(sample_commit("h1", "r", "u", base + Duration::hours(1)));
        store.add_commit(sample_commit("h2", "r", "u", base + Duration::hours(2)));

        let range = store.get_commits_by_time_range(base + Duration::hours(1), base + Duration::hours(2));
        let hashes: Vec<&str> = range.iter().map(|c| c.commit_hash.as_str()).collect();
        assert_eq!(hashes, vec!["h1", "h2"]);
    }

    #[test]
    fn clear_all_data_resets_everything_including_pr_counter() {
        let store = Store::new();
        store.add_commit(sample_commit("h1", "r", "u", Utc::now()));
        store.upsert_pr(sample_pr("r", 0, 1));
        store.clear_all_data();

        let stats = store.get_stats();
        assert_eq!(stats, Stats::default());
        assert_eq!(store.get_next_pr_number("r"), 1);
    }

    #[test]
    fn list_repositories_is_the_union_of_pr_and_issue_repos() {
        let store = Store::new();
        store.upsert_pr(sample_pr("acme/platform", 0, 1));
        store.store_issue(Issue {
            repo_name: "acme/docs".into(),
            number: 1,
            title: "t".into(),
            body: "".into(),
            state: IssueState::Open,
            author_id: "user_alice".into(),
            labels: Default::default(),
            created_at: Utc::now(),
            closed_at: None,
        });

        let mut repos = store.list_repositories();
        repos.sort();
        assert_eq!(repos, vec!["acme/docs".to_string(), "acme/platform".to_string()]);
    }

    #[test]
    fn stats_reflect_index_cardinalities() {
        let store = Store::new();
        store.load_developers(vec![]);
        store.add_commit(sample_commit("h1", "r", "u", Utc::now()));
        store.add_commit(sample_commit("h2", "r", "u", Utc::now()));
        assert_eq!(store.get_stats().commits, 2);
    }
}
