//! Usage-event synthesis (§4.E.5): for each persona-day within working
//! hours, sample small counts of each usage event kind weighted by the
//! persona's preferred models and chat/code mix.

use chrono::DateTime;
use chrono::Utc;
use cursor_sim_distributions::{SimRng, sample_poisson, weighted_choice};
use cursor_sim_types::persona::Developer;
use cursor_sim_types::usage::{
    AskModeEvent, ClientVersionEvent, CommandEvent, FileExtensionEvent, McpToolEvent,
    ModelUsageEvent, PlanEvent, UsageEvent, UsageType,
};

const COMMON_EXTENSIONS: &[&str] = &["rs", "ts", "py", "go"];
const COMMON_COMMANDS: &[&str] = &["format", "test", "build", "lint"];
const COMMON_TOOLS: &[&str] = &["search", "fetch", "browser"];
const COMMON_PLANS: &[&str] = &["pro", "business", "free"];
const PROMPT_THEMES: &[&str] = &["debugging", "refactoring", "explaining", "scaffolding", "reviewing"];

/// One usage event per sampled instant, dispatched across the seven kinds
/// weighted by `chat_vs_code_ratio` and the persona's preferred models.
pub fn synthesize_usage_events(
    rng: &mut SimRng,
    developer: &Developer,
    instants: &[DateTime<Utc>],
) -> Vec<UsageEvent> {
    if instants.is_empty() {
        return Vec::new();
    }
    let per_day_rate = 3.0 * developer.activity_level;
    let count = sample_poisson(rng, per_day_rate * (instants.len() as f64 / 6.0).max(1.0)) as usize;

    let kind_weights = [
        developer.chat_vs_code_ratio,
        1.0,
        0.6,
        0.4,
        0.5,
        0.2,
        developer.chat_vs_code_ratio * 0.5,
    ];

    let mut events = Vec::with_capacity(count);
    for i in 0..count {
        let timestamp = instants[i % instants.len()];
        let Some(kind) = weighted_choice(rng, &kind_weights) else {
            continue;
        };
        let event = match kind {
            0 => UsageEvent::ModelUsage(ModelUsageEvent {
                user_id: developer.user_id.clone(),
                timestamp,
                model_name: pick(rng, &developer.preferred_models).unwrap_or_else(|| "default".into()),
                usage_type: if sample_poisson(rng, developer.chat_vs_code_ratio) > 0 {
                    UsageType::Chat
                } else {
                    UsageType::Code
                },
            }),
            1 => UsageEvent::FileExtension(FileExtensionEvent {
                user_id: developer.user_id.clone(),
                timestamp,
                extension: pick_str(rng, COMMON_EXTENSIONS).to_string(),
            }),
            2 => UsageEvent::Command(CommandEvent {
                user_id: developer.user_id.clone(),
                timestamp,
                command_name: pick_str(rng, COMMON_COMMANDS).to_string(),
            }),
            3 => UsageEvent::McpTool(McpToolEvent {
                user_id: developer.user_id.clone(),
                timestamp,
                tool_name: pick_str(rng, COMMON_TOOLS).to_string(),
                mcp_server_name: "workspace".to_string(),
            }),
            4 => UsageEvent::AskMode(AskModeEvent {
                user_id: developer.user_id.clone(),
                timestamp,
                prompt_theme: pick_str(rng, PROMPT_THEMES).to_string(),
            }),
            5 => UsageEvent::Plan(PlanEvent {
                user_id: developer.user_id.clone(),
                timestamp,
                plan_name: pick_str(rng, COMMON_PLANS).to_string(),
            }),
            _ => UsageEvent::ClientVersion(ClientVersionEvent {
                user_id: developer.user_id.clone(),
                timestamp,
                client_version: "1.0.0".to_string(),
            }),
        };
        events.push(event);
    }
    events
}

fn pick(rng: &mut SimRng, options: &[String]) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let index = (rng.rng().random::<f64>() * options.len() as f64) as usize;
    options.get(index.min(options.len() - 1)).cloned()
}

fn pick_str<'a>(rng: &mut SimRng, options: &[&'a str]) -> &'a str {
    let index = (rng.rng().random::<f64>() * options.len() as f64) as usize;
    options[index.min(options.len() - 1)]
}
