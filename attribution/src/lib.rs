//! Commit authorship attribution
//!
//! # Overview
//!
//! Given a GitHub username, an attribution run walks the user's repositories
//! and classifies every commit author identity it finds.
//! Commits whose linked account handle equals the target username contribute
//! their author name and email to the username and email mappings.
//! Commits with no linked account contribute both fields to the unknown
//! mapping, and commits linked to any other account are skipped.
//! Every mapping records the repository an identity was first seen in.
//!
//! The walk runs as one sequential task: repositories are visited in order,
//! one commit-listing request each, with a pacing pause between repositories
//! to stay within API rate limits. A failed repository fetch is reported as
//! a notice and skipped; a missing user or exhausted rate limit ends the run.
//! Cancellation is cooperative through a token checked at every suspension
//! point.

mod runner;
mod session;
mod state;

pub use runner::AttributionRunner;
pub use session::{AttributionSession, RunReport, RunStatus};
pub use state::{Progress, RepoLocator, RunState};

use std::fmt;

/// User-visible events of a run. Cancellation is deliberately absent; it is
/// logged at debug level only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A run was requested with an empty username.
    EmptyUsername,
    /// One repository could not be fetched; the walk went on without it.
    RepoSkipped { repo: String, reason: String },
    /// The run ended before visiting every repository.
    RunFailed(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::EmptyUsername => write!(f, "Username must not be empty."),
            Notice::RepoSkipped { repo, reason } => write!(f, "Skipped repository {}: {}", repo, reason),
            Notice::RunFailed(reason) => write!(f, "Attribution run failed: {}", reason),
        }
    }
}
