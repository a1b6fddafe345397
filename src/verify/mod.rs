//! Checkpoint equivalence verification
//!
//! Given two job identifiers, locate the newest checkpoint directory of
//! each and compare them artifact class by artifact class:
//! - FILES: open regular-file descriptors, ids removed, log output tolerated
//! - MM: memory map scalars and VMAs, addresses removed
//! - PAGEMAP: page residency, tolerant up to a miss ratio
//! - OTHER: inventory, fdinfo, seccomp and fs state, byte-identical
//!
//! Comparators are independent of each other. A mismatch becomes a failing
//! [`ComparisonResult`]; a fatal precondition aborts the run with no report.

pub mod diagnostic;
pub mod files;
pub mod memory_map;
pub mod other;
pub mod pagemap;

pub use files::compare_files;
pub use memory_map::compare_memory_maps;
pub use other::compare_other;
pub use pagemap::{compare_pagemaps, count_misses, PagePairing};

use std::path::Path;
use std::thread;
use tracing::info;

use crate::config::VerifierConfig;
use crate::error::Result;
use crate::fs::artifacts::{load_files, load_memory_map, load_pagemap};
use crate::fs::locator::ArtifactLocator;
use crate::models::job::{CheckpointDirectory, JobId};
use crate::models::result::{ComparisonResult, VerificationReport};

/// Outcome of one verification run
#[derive(Debug, Clone)]
pub struct Verification {
    pub first: CheckpointDirectory,
    pub second: CheckpointDirectory,
    pub report: VerificationReport,
}

impl Verification {
    pub fn passed(&self) -> bool {
        self.report.passed()
    }
}

/// Locates and compares checkpoint pairs
#[derive(Debug, Clone)]
pub struct Verifier {
    config: VerifierConfig,
    locator: ArtifactLocator,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Self {
        let locator = ArtifactLocator::new(
            config.checkpoint_root.clone(),
            config.archive_extension.clone(),
        );
        Self { config, locator }
    }

    /// Overall verdict for two jobs
    pub fn verify(&self, first: &JobId, second: &JobId, verbose: bool) -> Result<bool> {
        Ok(self.run(first, second, verbose)?.passed())
    }

    /// Locate both checkpoints, then compare them
    pub fn run(&self, first: &JobId, second: &JobId, verbose: bool) -> Result<Verification> {
        let first = self.locator.locate(first)?;
        let second = self.locator.locate(second)?;
        info!(
            first = %first.path.display(),
            second = %second.path.display(),
            "located checkpoint directories"
        );

        if verbose && self.config.diagnostic.enabled {
            diagnostic::render_checkpoint(&self.config.diagnostic, first.path());
            diagnostic::render_checkpoint(&self.config.diagnostic, second.path());
        }

        let report = self.compare_directories(first.path(), second.path(), verbose)?;
        Ok(Verification {
            first,
            second,
            report,
        })
    }

    /// Run every comparator against two checkpoint directories.
    ///
    /// With `parallel` set the comparators run on scoped threads; the report
    /// order and the error surfaced on failure are the same either way.
    pub fn compare_directories(
        &self,
        first: &Path,
        second: &Path,
        verbose: bool,
    ) -> Result<VerificationReport> {
        let outcomes = if self.config.parallel {
            thread::scope(|s| {
                let handles = [
                    s.spawn(|| self.compare_files(first, second, verbose)),
                    s.spawn(|| self.compare_memory_maps(first, second, verbose)),
                    s.spawn(|| self.compare_pagemaps(first, second)),
                    s.spawn(|| compare_other(first, second, verbose)),
                ];
                handles.map(|h| h.join().unwrap_or_else(|p| std::panic::resume_unwind(p)))
            })
        } else {
            [
                self.compare_files(first, second, verbose),
                self.compare_memory_maps(first, second, verbose),
                self.compare_pagemaps(first, second),
                compare_other(first, second, verbose),
            ]
        };

        let results = outcomes.into_iter().collect::<Result<Vec<_>>>()?;
        for result in &results {
            info!(
                comparator = %result.name,
                passed = result.passed,
                reason = result.reason.as_deref().unwrap_or(""),
                "comparison finished"
            );
        }
        Ok(VerificationReport::new(results))
    }

    fn compare_files(&self, first: &Path, second: &Path, verbose: bool) -> Result<ComparisonResult> {
        let a = load_files(first)?;
        let b = load_files(second)?;
        Ok(compare_files(&a, &b, &self.config.log_output_prefix, verbose))
    }

    fn compare_memory_maps(
        &self,
        first: &Path,
        second: &Path,
        verbose: bool,
    ) -> Result<ComparisonResult> {
        let a = load_memory_map(first)?;
        let b = load_memory_map(second)?;
        Ok(compare_memory_maps(&a, &b, verbose))
    }

    fn compare_pagemaps(&self, first: &Path, second: &Path) -> Result<ComparisonResult> {
        let a = load_pagemap(first)?;
        let b = load_pagemap(second)?;
        Ok(compare_pagemaps(
            &a,
            &b,
            self.config.page_miss_threshold,
            self.config.pagemap_pairing,
        ))
    }
}

/// Verify two jobs with the default configuration lookup
pub fn verify(first: &JobId, second: &JobId, verbose: bool) -> Result<bool> {
    Verifier::new(VerifierConfig::load(None)?).verify(first, second, verbose)
}
