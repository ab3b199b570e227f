//! Plain (unlocked) index data held behind each of [`crate::store::Store`]'s
//! `RwLock`s. Kept separate from the locking/method layer so the shape of
//! each index (§4.F) is easy to read at a glance.

use cursor_sim_types::{Commit, Developer, Issue, IssueState, PullRequest, Review};
use std::collections::BTreeMap;
use std::collections::HashMap;

#[derive(Default)]
pub(crate) struct PersonaIndex {
    pub by_user_id: HashMap<String, Developer>,
    pub by_email: HashMap<String, String>,
}

impl PersonaIndex {
    pub(crate) fn load(&mut self, developers: Vec<Developer>) {
        self.by_user_id.clear();
        self.by_email.clear();
        for developer in developers {
            self.by_email
                .insert(developer.email.clone(), developer.user_id.clone());
            self.by_user_id.insert(developer.user_id.clone(), developer);
        }
    }

    pub(crate) fn get_by_email(&self, email: &str) -> Option<&Developer> {
        let user_id = self.by_email.get(email)?;
        self.by_user_id.get(user_id)
    }
}

/// Commits: a time-ordered append buffer plus O(1)/O(bucket) indexes.
/// `sorted` mirrors the append buffer but is only refreshed on demand
/// (§4.F: "lazily sorts the append-buffer on first query").
#[derive(Default)]
pub(crate) struct CommitIndex {
    pub append_buffer: Vec<Commit>,
    pub sorted: Vec<Commit>,
    pub needs_sort: bool,
    pub by_hash: HashMap<String, usize>,
    pub by_user: HashMap<String, Vec<usize>>,
    pub by_repo: HashMap<String, Vec<usize>>,
}

impl CommitIndex {
    pub(crate) fn push(&mut self, commit: Commit) {
        let position = self.append_buffer.len();
        self.by_hash.insert(commit.commit_hash.clone(), position);
        self.by_user
            .entry(commit.user_id.clone())
            .or_default()
            .push(position);
        self.by_repo
            .entry(commit.repo_name.clone())
            .or_default()
            .push(position);
        self.append_buffer.push(commit);
        self.needs_sort = true;
    }

    pub(crate) fn resort(&mut self) {
        if !self.needs_sort {
            return;
        }
        self.sorted = self.append_buffer.clone();
        self.sorted.sort_by_key(|commit| commit.commit_ts);
        self.needs_sort = false;
    }
}

#[derive(Default)]
pub(crate) struct PrIndex {
    pub by_id: BTreeMap<i64, PullRequest>,
    pub by_repo: HashMap<String, BTreeMap<i64, i64>>,
    pub by_author_id: HashMap<String, Vec<i64>>,
    pub by_author_email: HashMap<String, Vec<i64>>,
    pub next_pr_id: i64,
}

impl PrIndex {
    pub(crate) fn new() -> Self {
        PrIndex {
            next_pr_id: 1,
            ..Default::default()
        }
    }

    pub(crate) fn insert(&mut self, pr: PullRequest) {
        self.by_repo
            .entry(pr.repo_name.clone())
            .or_default()
            .insert(pr.number, pr.id);
        self.by_author_id
            .entry(pr.author_id.clone())
            .or_default()
            .push(pr.id);
        self.by_author_email
            .entry(pr.author_email.clone())
            .or_default()
            .push(pr.id);
        self.by_id.insert(pr.id, pr);
    }
}

#[derive(Default)]
pub(crate) struct ReviewIndex {
    pub by_id: BTreeMap<i64, Review>,
    pub by_pr_id: HashMap<i64, Vec<i64>>,
    pub by_reviewer_email: HashMap<String, Vec<i64>>,
    pub next_review_id: i64,
}

impl ReviewIndex {
    pub(crate) fn new() -> Self {
        ReviewIndex {
            next_review_id: 1,
            ..Default::default()
        }
    }

    pub(crate) fn insert(&mut self, review: Review) {
        self.by_pr_id.entry(review.pr_id).or_default().push(review.id);
        self.by_reviewer_email
            .entry(review.reviewer.clone())
            .or_default()
            .push(review.id);
        self.by_id.insert(review.id, review);
    }
}

#[derive(Default)]
pub(crate) struct IssueIndex {
    pub by_repo: HashMap<String, BTreeMap<i64, Issue>>,
    pub by_repo_state: HashMap<String, HashMap<IssueState, Vec<i64>>>,
}

impl IssueIndex {
    pub(crate) fn insert(&mut self, issue: Issue) {
        self.by_repo_state
            .entry(issue.repo_name.clone())
            .or_default()
            .entry(issue.state)
            .or_default()
            .push(issue.number);
        self.by_repo
            .entry(issue.repo_name.clone())
            .or_default()
            .insert(issue.number, issue);
    }
}

/// One append-only list per usage-event kind (§4.F, §3.7's seven kinds).
#[derive(Default)]
pub(crate) struct UsageIndex {
    pub model_usage: Vec<cursor_sim_types::ModelUsageEvent>,
    pub client_version: Vec<cursor_sim_types::ClientVersionEvent>,
    pub file_extension: Vec<cursor_sim_types::FileExtensionEvent>,
    pub mcp_tool: Vec<cursor_sim_types::McpToolEvent>,
    pub command: Vec<cursor_sim_types::CommandEvent>,
    pub plan: Vec<cursor_sim_types::PlanEvent>,
    pub ask_mode: Vec<cursor_sim_types::AskModeEvent>,
}

impl UsageIndex {
    pub(crate) fn total(&self) -> usize {
        self.model_usage.len()
            + self.client_version.len()
            + self.file_extension.len()
            + self.mcp_tool.len()
            + self.command.len()
            + self.plan.len()
            + self.ask_mode.len()
    }
}
