//! Typed errors (§7). The split mirrors the behavioral table in §7, not an
//! arbitrary taxonomy: loader/validator/replicator errors fail fast at
//! startup, query-layer errors surface locally to the caller, and
//! `InternalError` marks a store invariant violation that should never
//! happen in a correctly generated corpus.

use thiserror::Error;

/// Seed input could not be parsed at all (wrong shape, bad JSON/YAML/CSV).
#[derive(Debug, Error)]
#[error("failed to parse seed: {0}")]
pub struct SeedParseError(pub String);

/// One field-addressed validation failure, e.g. `developers[3].email`.
#[derive(Debug, Error)]
#[error("seed validation failed at {field}: {message}")]
pub struct SeedValidationError {
    pub field: String,
    pub message: String,
}

impl SeedValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        SeedValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The persona replicator was asked for an impossible target count.
#[derive(Debug, Error)]
pub enum InvalidTargetCount {
    #[error("target count must be >= 1, got {0}")]
    NonPositive(i64),
    #[error("seed has zero developers, cannot replicate to {0}")]
    EmptySeed(i64),
}

/// A requested page/page_size combination was out of range.
#[derive(Debug, Error)]
#[error("invalid pagination: {0}")]
pub struct InvalidPaginationError(pub String);

/// A requested date or date range was malformed (e.g. `from > to`).
#[derive(Debug, Error)]
#[error("invalid date: {0}")]
pub struct InvalidDateError(pub String);

/// A requested filter value was out of the accepted domain.
#[derive(Debug, Error)]
#[error("invalid filter: {0}")]
pub struct InvalidFilterError(pub String);

/// A repo path was not of the form `<owner>/<name>`.
#[derive(Debug, Error)]
#[error("invalid repo path: {0}")]
pub struct InvalidRepoPath(pub String);

/// A lookup by id found nothing.
#[derive(Debug, Error)]
#[error("not found: {0}")]
pub struct NotFoundError(pub String);

/// A store/generation invariant was violated. Per §7 policy this indicates a
/// programmer bug, not a recoverable condition; callers that see this should
/// abort rather than retry.
#[derive(Debug, Error)]
#[error("internal invariant violated: {0}")]
pub struct InternalError(pub String);

/// Errors the query layer surfaces to callers (§6, HTTP 400/404/500
/// analogues). `From` impls let call sites use `?` against the narrower
/// per-operation error types.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Pagination(#[from] InvalidPaginationError),
    #[error(transparent)]
    Date(#[from] InvalidDateError),
    #[error(transparent)]
    Filter(#[from] InvalidFilterError),
    #[error(transparent)]
    RepoPath(#[from] InvalidRepoPath),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Errors the seed loader/validator/replicator raise at startup (§7,
/// "fail-fast").
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Parse(#[from] SeedParseError),
    #[error(transparent)]
    Validation(#[from] SeedValidationError),
    #[error(transparent)]
    TargetCount(#[from] InvalidTargetCount),
}
