//! Query & analytics surface (§4.G): pagination, range/filter parsing, and
//! the derived-report computations that sit on top of whatever a query
//! already filtered down to.

pub mod analytics;
pub mod filters;
pub mod pagination;

pub use analytics::{
    pr_cycle_time, revert_analysis, review_quality, survival_cohort, DeveloperSurvival,
    PrCycleTimeReport, RevertRecord, RevertReport, ReviewQualityReport, SurvivalReport,
};
pub use filters::{
    parse_date_end_inclusive, parse_date_start, parse_label_filter, resolve_range,
    validate_repo_path, IssueStateFilter, PrStateFilter,
};
pub use pagination::{normalize, paginate, Page, MAX_PAGE_SIZE};
