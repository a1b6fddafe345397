//! Fatal error taxonomy for checkpoint verification
//!
//! Only preconditions that make a comparison meaningless live here. A
//! disagreement between two checkpoints is reported as a failing
//! [`ComparisonResult`](crate::models::result::ComparisonResult), never as
//! an error.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a verification run without producing a report
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// No checkpoint directory matches the job identifier
    #[error("No checkpoint directory for job '{job_id}' under {}", root.display())]
    NotFound {
        /// Job identifier used as the directory name prefix.
        job_id: String,
        /// Checkpoint root that was searched.
        root: PathBuf,
    },

    /// An artifact is missing, unreadable, or not the expected JSON document
    #[error("Malformed artifact {}: {reason}", path.display())]
    MalformedArtifact {
        /// Path of the offending artifact.
        path: PathBuf,
        /// What was wrong with it.
        reason: String,
    },

    /// A pattern that must resolve to exactly one artifact did not
    #[error(
        "Expected exactly one artifact matching '{pattern}' in {}, found {found}",
        dir.display()
    )]
    ArtifactCount {
        /// Checkpoint directory that was searched.
        dir: PathBuf,
        /// File name pattern, e.g. `mm-*.json`.
        pattern: String,
        /// Number of files that matched.
        found: usize,
    },

    /// Configuration file or value is invalid
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The report could not be written
    #[error("Failed to persist report to {}: {reason}", path.display())]
    Persist {
        /// Destination of the report.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },
}

impl VerifyError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::MalformedArtifact {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error signals an incompatible checkpoint format
    /// (bad artifact content or a violated singularity precondition).
    pub fn is_malformed_artifact(&self) -> bool {
        matches!(
            self,
            Self::MalformedArtifact { .. } | Self::ArtifactCount { .. }
        )
    }

    /// Whether this error means a job has no checkpoint directory
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, VerifyError>;
