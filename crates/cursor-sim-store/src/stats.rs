//! Corpus-wide counts (§4.F's `GetStats`).

use serde::{Deserialize, Serialize};
use std::ops::Sub;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub developers: u64,
    pub commits: u64,
    pub pull_requests: u64,
    pub reviews: u64,
    pub issues: u64,
    pub model_usage_events: u64,
    pub client_version_events: u64,
    pub file_extension_events: u64,
    pub mcp_tool_events: u64,
    pub command_events: u64,
    pub plan_events: u64,
    pub ask_mode_events: u64,
}

impl Stats {
    pub fn usage_events(&self) -> u64 {
        self.model_usage_events
            + self.client_version_events
            + self.file_extension_events
            + self.mcp_tool_events
            + self.command_events
            + self.plan_events
            + self.ask_mode_events
    }
}

/// Componentwise difference, used by `Regenerate` to report `after - before`
/// (§4.I, §8 invariant 8).
impl Sub for Stats {
    type Output = Stats;

    fn sub(self, rhs: Stats) -> Stats {
        Stats {
            developers: self.developers.saturating_sub(rhs.developers),
            commits: self.commits.saturating_sub(rhs.commits),
            pull_requests: self.pull_requests.saturating_sub(rhs.pull_requests),
            reviews: self.reviews.saturating_sub(rhs.reviews),
            issues: self.issues.saturating_sub(rhs.issues),
            model_usage_events: self.model_usage_events.saturating_sub(rhs.model_usage_events),
            client_version_events: self
                .client_version_events
                .saturating_sub(rhs.client_version_events),
            file_extension_events: self
                .file_extension_events
                .saturating_sub(rhs.file_extension_events),
            mcp_tool_events: self.mcp_tool_events.saturating_sub(rhs.mcp_tool_events),
            command_events: self.command_events.saturating_sub(rhs.command_events),
            plan_events: self.plan_events.saturating_sub(rhs.plan_events),
            ask_mode_events: self.ask_mode_events.saturating_sub(rhs.ask_mode_events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtraction_is_componentwise_and_saturating() {
        let before = Stats {
            developers: 2,
            commits: 10,
            ..Default::default()
        };
        let after = Stats {
            developers: 5,
            commits: 10,
            pull_requests: 3,
            ..Default::default()
        };
        let delta = after - before;
        assert_eq!(delta.developers, 3);
        assert_eq!(delta.commits, 0);
        assert_eq!(delta.pull_requests, 3);
    }
}
