//! Seed loading and validation (§4.B). Accepts a JSON or YAML document for
//! the full schema, or a CSV reader for minimal persona-only seeding
//! composed onto an in-memory template.

use cursor_sim_types::persona::{GaussianParams, PrBehavior, Seniority, WorkingHoursBand};
use cursor_sim_types::{BootstrapError, Developer, Seed, SeedParseError, SeedValidationError};
use std::collections::HashMap;
use std::path::Path;

/// Load a seed from a filesystem path. The extension selects the format:
/// `.json` for JSON, `.yaml`/`.yml` for YAML, `.csv` for the persona-only
/// CSV variant composed onto a built-in template.
pub fn load_from_path(path: &Path) -> Result<Seed, BootstrapError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| SeedParseError(format!("could not read seed file {}: {e}", path.display())))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let seed = match extension.as_str() {
        "json" => parse_json(&contents)?,
        "yaml" | "yml" => parse_yaml(&contents)?,
        "csv" => parse_csv(&contents, &template_seed())?,
        other => {
            return Err(SeedParseError(format!(
                "unrecognized seed file extension {other:?}; expected json, yaml, yml, or csv"
            ))
            .into());
        }
    };

    validate(&seed)?;
    Ok(seed)
}

pub fn parse_json(contents: &str) -> Result<Seed, SeedParseError> {
    serde_json::from_str(contents).map_err(|e| SeedParseError(format!("invalid JSON seed: {e}")))
}

pub fn parse_yaml(contents: &str) -> Result<Seed, SeedParseError> {
    serde_yaml::from_str(contents).map_err(|e| SeedParseError(format!("invalid YAML seed: {e}")))
}

/// Parse `user_id,email,name[,...]` CSV rows into personas and compose them
/// onto `template`'s non-persona fields (§4.B's CSV variant).
pub fn parse_csv(contents: &str, template: &Seed) -> Result<Seed, SeedParseError> {
    let mut lines = contents.lines();
    let header_line = lines
        .next()
        .ok_or_else(|| SeedParseError("CSV seed is empty".into()))?;
    let headers: Vec<&str> = header_line.split(',').map(str::trim).collect();
    let required = ["user_id", "email", "name"];
    for column in required {
        if !headers.contains(&column) {
            return Err(SeedParseError(format!(
                "CSV seed missing required header {column:?}"
            )));
        }
    }
    let column_index: HashMap<&str, usize> =
        headers.iter().enumerate().map(|(i, h)| (*h, i)).collect();

    let mut developers = Vec::new();
    for (row_number, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let get = |column: &str| -> Result<&str, SeedParseError> {
            column_index
                .get(column)
                .and_then(|&i| fields.get(i))
                .copied()
                .ok_or_else(|| {
                    SeedParseError(format!("CSV row {row_number} missing column {column:?}"))
                })
        };
        developers.push(default_developer(get("user_id")?, get("email")?, get("name")?));
    }

    Ok(Seed {
        developers,
        ..template.clone()
    })
}

/// A minimal, internally-consistent seed used as the CSV-composition
/// template when the caller supplies no full-schema document of their own.
pub fn template_seed() -> Seed {
    Seed {
        developers: Vec::new(),
        repositories: Vec::new(),
        text_templates: Default::default(),
        correlations: cursor_sim_types::Correlations {
            seniority_behavior_modifiers: HashMap::new(),
            region_activity: HashMap::new(),
            lines_per_change: HashMap::new(),
        },
        pr_lifecycle: cursor_sim_types::PrLifecycle {
            cycle_times: cursor_sim_types::CycleTimes {
                coding_lead_time: default_distribution(),
                pickup_time: default_distribution(),
                review_lead_time: default_distribution(),
            },
            review_patterns: cursor_sim_types::ReviewPatterns {
                comments_per_100_loc: 2.0,
                iteration_count: default_distribution(),
                reviewer_count: default_distribution(),
            },
            quality_outcomes: cursor_sim_types::QualityOutcomes {
                revert_probability_base: 0.03,
                hotfix_probability_base: 0.05,
                survival_30d_probability_base: 0.9,
                modifiers_by_seniority: HashMap::new(),
                modifiers_by_ai_ratio_band: HashMap::new(),
                scope_creep_ratio: 0.1,
                rework_ratio: 0.1,
            },
            merge_probability: 0.85,
        },
        external_data_sources: None,
    }
}

fn default_distribution() -> cursor_sim_types::ModifiedDistribution {
    cursor_sim_types::ModifiedDistribution {
        base_distribution: "lognormal".into(),
        params: HashMap::new(),
        modifiers_by_seniority: HashMap::new(),
        modifiers_by_pr_size: HashMap::new(),
    }
}

fn default_developer(user_id: &str, email: &str, name: &str) -> Developer {
    Developer {
        user_id: user_id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        org: "default".into(),
        division: "default".into(),
        team: "default".into(),
        role: "ic".into(),
        region: "us".into(),
        timezone: "UTC".into(),
        locale: "en-US".into(),
        seniority: Seniority::Mid,
        activity_level: 0.5,
        acceptance_rate: 0.4,
        pr_behavior: PrBehavior {
            prs_per_week: 2.0,
            avg_loc: 100.0,
            avg_files: 3.0,
            thoroughness: 0.5,
            iteration_tolerance: 0.5,
        },
        coding_speed: GaussianParams {
            mean: 30.0,
            std_dev: 8.0,
        },
        preferred_models: vec!["gpt-5".into()],
        chat_vs_code_ratio: 0.5,
        working_hours: WorkingHoursBand {
            start: 9,
            end: 17,
            peak: 11,
        },
    }
}

/// Run the §4.B validation rules, reporting the first violation found at its
/// field address.
pub fn validate(seed: &Seed) -> Result<(), SeedValidationError> {
    if seed.developers.is_empty() {
        return Err(SeedValidationError::new(
            "developers",
            "must be non-empty",
        ));
    }

    for (index, developer) in seed.developers.iter().enumerate() {
        if !developer.user_id.starts_with("user_") {
            return Err(SeedValidationError::new(
                format!("developers[{index}].user_id"),
                format!("must begin with 'user_', got {:?}", developer.user_id),
            ));
        }
        if !is_valid_email(&developer.email) {
            return Err(SeedValidationError::new(
                format!("developers[{index}].email"),
                format!("must match <local>@<domain-with-dot>, got {:?}", developer.email),
            ));
        }
        if !(0.0..=1.0).contains(&developer.acceptance_rate) {
            return Err(SeedValidationError::new(
                format!("developers[{index}].acceptance_rate"),
                format!("must be in [0,1], got {}", developer.acceptance_rate),
            ));
        }
    }

    let mut seen_user_ids: HashMap<&str, usize> = HashMap::new();
    for (index, developer) in seed.developers.iter().enumerate() {
        if let Some(&first) = seen_user_ids.get(developer.user_id.as_str()) {
            return Err(SeedValidationError::new(
                format!("developers[{first}].user_id,developers[{index}].user_id"),
                format!("duplicate user_id {:?}", developer.user_id),
            ));
        }
        seen_user_ids.insert(&developer.user_id, index);
    }

    let mut seen_emails: HashMap<&str, usize> = HashMap::new();
    for (index, developer) in seed.developers.iter().enumerate() {
        if let Some(&first) = seen_emails.get(developer.email.as_str()) {
            return Err(SeedValidationError::new(
                format!("developers[{first}].email,developers[{index}].email"),
                format!("duplicate email {:?}", developer.email),
            ));
        }
        seen_emails.insert(&developer.email, index);
    }

    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.contains(' ') {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
