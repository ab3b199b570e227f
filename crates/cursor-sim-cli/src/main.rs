use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, ValueEnum};

use cursor_sim::generators::{GenerationConfig, Horizon};
use cursor_sim::reporter::GenerationReporter;
use cursor_sim::seed_loader;
use cursor_sim::Simulator;

/// Process mode (§6.3). `Runtime` generates a corpus and reports it once;
/// `Replay` is accepted for flag compatibility with a service that would
/// serve the §6.1 HTTP surface against a previously generated corpus — that
/// server is an external collaborator this crate does not implement, so
/// `Replay` here just generates the same corpus and says so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Runtime,
    Replay,
}

/// Coarse generation-volume preset (§6.3), mapped onto the generator's
/// per-developer commit cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Velocity {
    Low,
    Medium,
    High,
}

impl Velocity {
    fn commit_cap_per_developer(self) -> u32 {
        match self {
            Velocity::Low => 20,
            Velocity::Medium => 60,
            Velocity::High => 150,
        }
    }
}

/// Bootstrap a synthetic developer-productivity corpus from a seed file and
/// print a summary of what was generated.
#[derive(Parser, Debug)]
#[command(name = "cursor-sim", version)]
#[command(about = "Seed-driven synthetic corpus generator for a developer-productivity SaaS")]
struct Cli {
    /// Path to the seed file (.json, .yaml/.yml, or .csv).
    #[arg(long, env = "CURSOR_SIM_SEED")]
    seed: PathBuf,

    /// Runtime vs. replay process mode.
    #[arg(long, value_enum, default_value = "runtime", env = "CURSOR_SIM_MODE")]
    mode: Mode,

    /// Port a serving layer would bind to. Accepted for flag compatibility;
    /// this crate reports the generated corpus and does not bind a socket.
    #[arg(long, env = "CURSOR_SIM_PORT")]
    port: Option<u16>,

    /// Horizon length in days.
    #[arg(long, env = "CURSOR_SIM_DAYS", conflicts_with = "interactive")]
    days: Option<i64>,

    /// Horizon length in months; overrides `--days` when both are given.
    #[arg(long, env = "CURSOR_SIM_MONTHS", conflicts_with = "interactive")]
    months: Option<i64>,

    /// Generation-volume preset.
    #[arg(long, value_enum, default_value = "medium", env = "CURSOR_SIM_VELOCITY")]
    velocity: Velocity,

    /// Target developer headcount; defaults to the seed's own developer count.
    #[arg(long, env = "CURSOR_SIM_DEVELOPERS", conflicts_with = "interactive")]
    developers: Option<i64>,

    /// Per-developer commit cap override; defaults to the velocity preset.
    #[arg(long, env = "CURSOR_SIM_MAX_COMMITS", conflicts_with = "interactive")]
    max_commits: Option<u32>,

    /// Prompt on stdin for horizon, developer count, and commit cap instead
    /// of taking them from flags/env.
    #[arg(long)]
    interactive: bool,
}

struct CliReporter;

impl GenerationReporter for CliReporter {
    fn info(&mut self, msg: &str) {
        eprintln!("[info] {msg}");
    }

    fn warn(&mut self, msg: &str) {
        eprintln!("[warn] {msg}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let seed = seed_loader::load_from_path(&cli.seed)
        .with_context(|| format!("failed to load seed file {}", cli.seed.display()))?;

    let (days, developer_count, commit_cap) = if cli.interactive {
        prompt_for_run_parameters(&seed)?
    } else {
        let days = resolve_days(cli.days, cli.months);
        let developer_count = cli.developers.unwrap_or(seed.developers.len() as i64);
        let commit_cap = cli.max_commits.unwrap_or_else(|| cli.velocity.commit_cap_per_developer());
        (days, developer_count, commit_cap)
    };

    if days < 1 {
        bail!("--days/--months must resolve to at least 1 day, got {days}");
    }

    let now = Utc::now();
    let config = GenerationConfig {
        horizon: Horizon {
            start: now - Duration::days(days),
            end: now,
        },
        commit_cap_per_developer: commit_cap,
    };

    let rng_seed = hash_str(&cli.seed.display().to_string());
    let mut reporter = CliReporter;
    let simulator = Simulator::bootstrap(seed, rng_seed, developer_count, config, &mut reporter)
        .context("failed to bootstrap simulator from seed")?;

    print_summary(&cli, &simulator);
    Ok(())
}

/// `--months` overrides `--days` when both are given; absent both, default
/// to a 30-day horizon.
fn resolve_days(days: Option<i64>, months: Option<i64>) -> i64 {
    months.map(|months| months * 30).or(days).unwrap_or(30)
}

/// Read horizon days, developer count, and commit cap from stdin (§6.3
/// `--interactive`).
fn prompt_for_run_parameters(seed: &cursor_sim_types::Seed) -> Result<(i64, i64, u32)> {
    let days = prompt("Horizon in days", "30")?.parse::<i64>().context("invalid days")?;
    let developer_count = prompt("Developer headcount", &seed.developers.len().to_string())?
        .parse::<i64>()
        .context("invalid developer count")?;
    let commit_cap = prompt("Max commits per developer", "60")?
        .parse::<u32>()
        .context("invalid max commits")?;
    Ok((days, developer_count, commit_cap))
}

fn prompt(label: &str, default: &str) -> Result<String> {
    print!("{label} [{default}]: ");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line).context("failed to read stdin")?;
    let trimmed = line.trim();
    Ok(if trimmed.is_empty() { default.to_string() } else { trimmed.to_string() })
}

fn print_summary(cli: &Cli, simulator: &Simulator) {
    let stats = simulator.store().get_stats();
    println!("mode: {:?}", cli.mode);
    if let Some(port) = cli.port {
        println!("port: {port} (accepted, not bound — HTTP serving is out of this crate's scope)");
    }
    println!("seed: {}", cli.seed.display());
    println!();
    println!("developers:          {}", stats.developers);
    println!("commits:             {}", stats.commits);
    println!("pull_requests:       {}", stats.pull_requests);
    println!("reviews:             {}", stats.reviews);
    println!("issues:              {}", stats.issues);
    println!("usage_events:        {}", stats.usage_events());
    println!("  model_usage:       {}", stats.model_usage_events);
    println!("  client_version:    {}", stats.client_version_events);
    println!("  file_extension:    {}", stats.file_extension_events);
    println!("  mcp_tool:          {}", stats.mcp_tool_events);
    println!("  command:           {}", stats.command_events);
    println!("  plan:              {}", stats.plan_events);
    println!("  ask_mode:          {}", stats.ask_mode_events);
}

/// Deterministic 64-bit hash used to derive the generation RNG seed from the
/// seed file's path, since §6.3 takes no explicit RNG-seed flag.
fn hash_str(value: &str) -> u64 {
    use std::hash::{Hash, Hasher};
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn resolve_days_prefers_months_over_days() {
        assert_eq!(resolve_days(Some(10), Some(2)), 60);
        assert_eq!(resolve_days(Some(10), None), 10);
        assert_eq!(resolve_days(None, None), 30);
    }

    #[test]
    fn velocity_commit_caps_match_the_low_medium_high_presets() {
        assert_eq!(Velocity::Low.commit_cap_per_developer(), 20);
        assert_eq!(Velocity::Medium.commit_cap_per_developer(), 60);
        assert_eq!(Velocity::High.commit_cap_per_developer(), 150);
    }

    #[test]
    fn hash_str_is_deterministic_and_path_sensitive() {
        assert_eq!(hash_str("seed.json"), hash_str("seed.json"));
        assert_ne!(hash_str("seed.json"), hash_str("other.json"));
    }

    #[test]
    fn cli_reporter_methods_are_callable() {
        let mut rep = CliReporter;
        rep.info("info");
        rep.warn("warn");
    }

    #[test]
    fn cli_parses_seed_path_and_defaults_mode_to_runtime() {
        let td = tempdir().expect("tempdir");
        let seed_path = td.path().join("seed.json");
        fs::write(&seed_path, "{}").expect("write seed stub");

        let cli = Cli::parse_from(["cursor-sim", "--seed", seed_path.to_str().expect("utf8")]);
        assert_eq!(cli.mode, Mode::Runtime);
        assert_eq!(cli.velocity, Velocity::Medium);
        assert!(!cli.interactive);
    }

    #[test]
    fn cli_rejects_interactive_combined_with_sizing_flags() {
        let result = Cli::try_parse_from([
            "cursor-sim",
            "--seed",
            "seed.json",
            "--interactive",
            "--days",
            "10",
        ]);
        assert!(result.is_err());
    }
}
