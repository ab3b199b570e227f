//! Domain types for cursor-sim.
//!
//! This crate holds the data model a seed document describes and a
//! generated corpus is made of: personas, repositories, commits, pull
//! requests, reviews, issues, usage telemetry, the external auxiliary
//! datasets, and the typed errors the rest of the workspace raises. It has
//! no generation or storage logic of its own.

pub mod commit;
pub mod error;
pub mod external;
pub mod issue;
pub mod persona;
pub mod pull_request;
pub mod repository;
pub mod review;
pub mod seed;
pub mod usage;

pub use commit::{Commit, EventKind, LineBuckets};
pub use error::{
    BootstrapError, InternalError, InvalidDateError, InvalidFilterError, InvalidPaginationError,
    InvalidRepoPath, InvalidTargetCount, NotFoundError, QueryError, SeedParseError,
    SeedValidationError,
};
pub use external::{
    CopilotUsageRow, ExportJob, FileBlob, HarveyEvent, JobStatus, PeriodDays, Survey,
};
pub use issue::{Issue, IssueState};
pub use persona::{Developer, GaussianParams, PrBehavior, Seniority, WorkingHoursBand};
pub use pull_request::{PrSizeBand, PrState, PullRequest};
pub use repository::{CodeQualityBaseline, RepoMaturity, Repository};
pub use review::{Review, ReviewComment, ReviewState};
pub use seed::{
    AiRatioBand, Correlations, CycleTimes, ExternalDataSources, GaussianCap, ModifiedDistribution,
    PrLifecycle, QualityOutcomes, RegionActivity, ReviewPatterns, Seed, TextTemplates,
};
pub use usage::{
    AskModeEvent, ClientVersionEvent, CommandEvent, FileExtensionEvent, McpToolEvent, ModelUsageEvent,
    PlanEvent, UsageEvent, UsageType,
};
