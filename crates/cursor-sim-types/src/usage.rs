//! Usage telemetry events (§3.7): flat, append-only, timestamped events
//! emitted per persona-day by the usage-event synthesizer (§4.E.5).
//!
//! §3.7 lists seven event-specific shapes (model usage, client version, file
//! extension, MCP tool invocation, command invocation, plan event, ask-mode
//! event) while its own prose calls them "five" kinds; all seven are stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a model invocation was a chat turn or an inline code completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageType {
    Chat,
    Code,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelUsageEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub model_name: String,
    pub usage_type: UsageType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientVersionEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub client_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileExtensionEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpToolEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub tool_name: String,
    pub mcp_server_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub command_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub plan_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskModeEvent {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub prompt_theme: String,
}

/// The seven kinds of usage event, tagged for storage/serialization
/// dispatch. `Store::*` keeps one append list per variant (§4.F).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UsageEvent {
    ModelUsage(ModelUsageEvent),
    ClientVersion(ClientVersionEvent),
    FileExtension(FileExtensionEvent),
    McpTool(McpToolEvent),
    Command(CommandEvent),
    Plan(PlanEvent),
    AskMode(AskModeEvent),
}

impl UsageEvent {
    pub fn user_id(&self) -> &str {
        match self {
            UsageEvent::ModelUsage(e) => &e.user_id,
            UsageEvent::ClientVersion(e) => &e.user_id,
            UsageEvent::FileExtension(e) => &e.user_id,
            UsageEvent::McpTool(e) => &e.user_id,
            UsageEvent::Command(e) => &e.user_id,
            UsageEvent::Plan(e) => &e.user_id,
            UsageEvent::AskMode(e) => &e.user_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            UsageEvent::ModelUsage(e) => e.timestamp,
            UsageEvent::ClientVersion(e) => e.timestamp,
            UsageEvent::FileExtension(e) => e.timestamp,
            UsageEvent::McpTool(e) => e.timestamp,
            UsageEvent::Command(e) => e.timestamp,
            UsageEvent::Plan(e) => e.timestamp,
            UsageEvent::AskMode(e) => e.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_and_timestamp_delegate_through_every_variant() {
        let t = Utc::now();
        let events = vec![
            UsageEvent::ModelUsage(ModelUsageEvent {
                user_id: "user_a".into(),
                timestamp: t,
                model_name: "gpt-5".into(),
                usage_type: UsageType::Chat,
            }),
            UsageEvent::McpTool(McpToolEvent {
                user_id: "user_a".into(),
                timestamp: t,
                tool_name: "search".into(),
                mcp_server_name: "docs".into(),
            }),
            UsageEvent::AskMode(AskModeEvent {
                user_id: "user_a".into(),
                timestamp: t,
                prompt_theme: "debugging".into(),
            }),
        ];
        for event in &events {
            assert_eq!(event.user_id(), "user_a");
            assert_eq!(event.timestamp(), t);
        }
    }

    #[test]
    fn tagged_serialization_roundtrips() {
        let event = UsageEvent::Command(CommandEvent {
            user_id: "user_a".into(),
            timestamp: Utc::now(),
            command_name: "reformat".into(),
        });
        let json = serde_json::to_string(&event).expect("serialize");
        let back: UsageEvent = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, event);
    }
}
