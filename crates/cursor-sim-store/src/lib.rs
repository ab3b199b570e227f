//! The thread-safe indexed in-memory store a generated corpus lives in.
//!
//! [`Store`] holds personas, commits, pull requests, reviews, issues, and
//! usage events behind one reader-writer lock (§4.F). [`external`] holds the
//! three independently-locked auxiliary-dataset façades (§4.H).

mod indexes;
pub mod external;
mod stats;
mod store;

pub use external::{CopilotStore, HarveyStore, QualtricsStore};
pub use stats::Stats;
pub use store::Store;
