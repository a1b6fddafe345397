//! Show which checkpoint directory a job resolves to

use anyhow::{Context, Result};

use crate::config::VerifierConfig;
use crate::fs::locator::ArtifactLocator;
use crate::models::job::JobId;

pub fn execute(config: &VerifierConfig, job: &JobId) -> Result<()> {
    let locator = ArtifactLocator::new(&config.checkpoint_root, &config.archive_extension);
    let dir = locator
        .locate(job)
        .with_context(|| format!("Failed to locate checkpoint for '{job}'"))?;
    println!("{}", dir.path.display());
    Ok(())
}
