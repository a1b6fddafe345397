//! Job identifiers and the checkpoint directories they resolve to

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::validation::validate_id;

/// Logical identifier of one executed and checkpointed job instance.
///
/// Checkpoint directories are named `<job-id>-<suffix>`; the identifier is
/// matched as a plain name prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> anyhow::Result<Self> {
        let id = id.into();
        validate_id(&id)?;
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of one side of a suite scenario: `<job>-<scenario>-<n>`
    pub fn for_scenario(job: &str, scenario: &str, instance: u8) -> anyhow::Result<Self> {
        Self::new(format!("{job}-{scenario}-{instance}"))
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for JobId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A located checkpoint directory for one job. Read-only to the verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointDirectory {
    pub job_id: JobId,
    pub path: PathBuf,
}

impl CheckpointDirectory {
    pub fn new(job_id: JobId, path: PathBuf) -> Self {
        Self { job_id, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn artifact(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}
