//! Checkpoint directory lookup
//!
//! The checkpointer writes one directory per checkpoint operation, named
//! `<job-id>-<suffix>`, and may leave archives of them alongside. The most
//! recently modified directory for a job is the one to verify.

use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::{debug, warn};

use crate::error::{Result, VerifyError};
use crate::models::job::{CheckpointDirectory, JobId};

/// Resolves job identifiers to checkpoint directories under one root
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    root: PathBuf,
    archive_extension: String,
}

impl ArtifactLocator {
    pub fn new(root: impl Into<PathBuf>, archive_extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            archive_extension: archive_extension.into(),
        }
    }

    /// Find the newest directory whose name starts with `job_id`.
    ///
    /// Ties in modification time go to the lexicographically greatest path.
    pub fn locate(&self, job_id: &JobId) -> Result<CheckpointDirectory> {
        let not_found = || VerifyError::NotFound {
            job_id: job_id.to_string(),
            root: self.root.clone(),
        };

        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "cannot read checkpoint root");
                return Err(not_found());
            }
        };

        let mut best: Option<(SystemTime, PathBuf)> = None;
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !name.starts_with(job_id.as_str()) || name.ends_with(&self.archive_extension) {
                continue;
            }

            // Follows symlinks, so a linked checkpoint directory is a candidate
            let path = entry.path();
            let Ok(metadata) = fs::metadata(&path) else {
                continue;
            };
            if !metadata.is_dir() {
                continue;
            }
            let Ok(modified) = metadata.modified() else {
                continue;
            };

            debug!(candidate = %path.display(), "checkpoint directory candidate");
            let candidate = (modified, path);
            if best.as_ref().is_none_or(|current| candidate > *current) {
                best = Some(candidate);
            }
        }

        best.map(|(_, path)| CheckpointDirectory::new(job_id.clone(), path))
            .ok_or_else(not_found)
    }
}
