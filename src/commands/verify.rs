//! Verify one pair of checkpointed jobs

use anyhow::{Context, Result};
use std::path::Path;

use super::output::{print_header, report_lines};
use crate::config::VerifierConfig;
use crate::fs::report::persist;
use crate::models::job::JobId;
use crate::verify::{Verification, Verifier};

/// Execute the verify command; returns the overall verdict
pub fn execute(
    config: VerifierConfig,
    first: &JobId,
    second: &JobId,
    verbose: bool,
    output: Option<&Path>,
) -> Result<bool> {
    let verifier = Verifier::new(config);
    let verification = run_pair(&verifier, first, second, verbose, output)?;
    Ok(verification.passed())
}

/// Console report for one pair; the verdict is carried by the exit status alone
/// unless verbose
fn console_lines(verification: &Verification, verbose: bool) -> Vec<String> {
    if verbose {
        report_lines(verification)
    } else {
        Vec::new()
    }
}

/// Verify, print (verbose only) and persist one pair
pub(crate) fn run_pair(
    verifier: &Verifier,
    first: &JobId,
    second: &JobId,
    verbose: bool,
    output: Option<&Path>,
) -> Result<Verification> {
    if verbose {
        print_header(first, second);
    }

    let verification = verifier
        .run(first, second, verbose)
        .with_context(|| format!("Failed to verify '{first}' against '{second}'"))?;

    for line in console_lines(&verification, verbose) {
        println!("{line}");
    }

    if let Some(path) = output {
        persist(&verification, path)
            .with_context(|| format!("Failed to save report: {}", path.display()))?;
    }

    Ok(verification)
}
