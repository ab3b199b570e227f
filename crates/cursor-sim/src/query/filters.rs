//! Range and filter semantics (§4.G.2): `YYYY-MM-DD` date parsing with
//! inclusive end-of-day `to`, missing-bound defaults, enum filter
//! validation, ANDed label filters, and `<owner>/<name>` repo-path
//! validation.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use cursor_sim_types::{InvalidDateError, InvalidFilterError, InvalidRepoPath, PrState, Repository};
use std::collections::BTreeSet;

/// Parse one `YYYY-MM-DD` date as the start of that day, UTC.
pub fn parse_date_start(value: &str) -> Result<DateTime<Utc>, InvalidDateError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| InvalidDateError(format!("invalid date {value:?}: {e}")))?;
    Ok(date.and_hms_opt(0, 0, 0).expect("midnight is always valid").and_utc())
}

/// Parse one `YYYY-MM-DD` date as the inclusive end of that day, UTC
/// (§4.G.2: "`to` is inclusive end-of-day").
pub fn parse_date_end_inclusive(value: &str) -> Result<DateTime<Utc>, InvalidDateError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| InvalidDateError(format!("invalid date {value:?}: {e}")))?;
    Ok(date
        .and_hms_nano_opt(23, 59, 59, 999_999_999)
        .expect("end of day is always valid")
        .and_utc())
}

/// Resolve a `(from, to)` query pair per §4.G.2's missing-bound defaults:
/// missing `from` is negative infinity, missing `to` is `now + 1 day`
/// (inclusive-today). `now` is threaded in explicitly (via [`crate::clock::Clock`])
/// rather than read ad hoc, per §2 of the expanded spec.
pub fn resolve_range(
    from: Option<&str>,
    to: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), InvalidDateError> {
    let from_dt = match from {
        Some(value) => parse_date_start(value)?,
        None => DateTime::<Utc>::MIN_UTC,
    };
    let to_dt = match to {
        Some(value) => parse_date_end_inclusive(value)?,
        None => now + Duration::days(1),
    };
    Ok((from_dt, to_dt))
}

/// A PR state filter, including the raw-array surface's `all` value
/// (§6.1). Missing means "no filter" and matches everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrStateFilter {
    Open,
    Closed,
    Merged,
    All,
}

impl PrStateFilter {
    pub fn parse(raw: Option<&str>) -> Result<PrStateFilter, InvalidFilterError> {
        match raw {
            None => Ok(PrStateFilter::All),
            Some("open") => Ok(PrStateFilter::Open),
            Some("closed") => Ok(PrStateFilter::Closed),
            Some("merged") => Ok(PrStateFilter::Merged),
            Some("all") => Ok(PrStateFilter::All),
            Some(other) => Err(InvalidFilterError(format!(
                "invalid state filter {other:?}; expected open, closed, merged, or all"
            ))),
        }
    }

    pub fn matches(self, state: PrState) -> bool {
        match self {
            PrStateFilter::All => true,
            PrStateFilter::Open => state == PrState::Open,
            PrStateFilter::Closed => state == PrState::Closed,
            PrStateFilter::Merged => state == PrState::Merged,
        }
    }
}

/// An issue state filter (§3.6: `open | closed`). Missing matches
/// everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStateFilter {
    Open,
    Closed,
    All,
}

impl IssueStateFilter {
    pub fn parse(raw: Option<&str>) -> Result<IssueStateFilter, InvalidFilterError> {
        match raw {
            None => Ok(IssueStateFilter::All),
            Some("open") => Ok(IssueStateFilter::Open),
            Some("closed") => Ok(IssueStateFilter::Closed),
            Some(other) => Err(InvalidFilterError(format!(
                "invalid state filter {other:?}; expected open or closed"
            ))),
        }
    }

    pub fn matches(self, state: cursor_sim_types::IssueState) -> bool {
        use cursor_sim_types::IssueState;
        match self {
            IssueStateFilter::All => true,
            IssueStateFilter::Open => state == IssueState::Open,
            IssueStateFilter::Closed => state == IssueState::Closed,
        }
    }
}

/// Parse a comma-separated label filter into the set every matched issue
/// must contain all of (§4.G.2: "ANDed").
pub fn parse_label_filter(raw: Option<&str>) -> BTreeSet<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Validate a `<owner>/<name>` repo path (§4.G.3).
pub fn validate_repo_path(repo_name: &str) -> Result<(&str, &str), InvalidRepoPath> {
    Repository::split_owner_name(repo_name)
        .ok_or_else(|| InvalidRepoPath(format!("expected <owner>/<name>, got {repo_name:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    #[test]
    fn end_of_day_is_inclusive_of_the_whole_day() {
        let end = parse_date_end_inclusive("2026-03-05").unwrap();
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2026, 3, 5).unwrap());
        assert_eq!(end.hour(), 23);
    }

    #[test]
    fn missing_from_is_negative_infinity() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let (from, _) = resolve_range(None, None, now).unwrap();
        assert_eq!(from, DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn missing_to_is_now_plus_one_day() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let (_, to) = resolve_range(None, None, now).unwrap();
        assert_eq!(to, now + Duration::days(1));
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(parse_date_start("06/01/2026").is_err());
    }

    #[test]
    fn pr_state_filter_all_matches_everything() {
        let filter = PrStateFilter::parse(Some("all")).unwrap();
        assert!(filter.matches(PrState::Open));
        assert!(filter.matches(PrState::Merged));
    }

    #[test]
    fn pr_state_filter_rejects_unknown_values() {
        assert!(PrStateFilter::parse(Some("bogus")).is_err());
    }

    #[test]
    fn label_filter_splits_and_trims() {
        let labels = parse_label_filter(Some("bug, critical ,p1"));
        assert_eq!(labels.len(), 3);
        assert!(labels.contains("critical"));
    }

    #[test]
    fn missing_label_filter_is_empty_and_matches_everything() {
        assert!(parse_label_filter(None).is_empty());
    }

    #[test]
    fn repo_path_requires_owner_and_name() {
        assert!(validate_repo_path("acme/platform").is_ok());
        assert!(validate_repo_path("acme").is_err());
    }
}
