//! Verify every correctness scenario of one workload
//!
//! Each scenario ran the workload twice, as `<job>-<scenario>-1` and
//! `<job>-<scenario>-2`, with a different checkpoint/restore sequence applied
//! to the second instance. Both instances must end in equivalent state.

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::output::print_suite_summary;
use super::verify::run_pair;
use crate::config::VerifierConfig;
use crate::models::job::JobId;
use crate::verify::Verifier;

/// Scenarios exercised by the correctness benchmark when none are given
pub const DEFAULT_SCENARIOS: &[&str] = &["base", "c2r2", "c1c2r1r2", "c1r1c2r2", "c2r2c2r2"];

/// Report path for one scenario: `<dir>/terminal_<scenario>.csv`
pub fn scenario_report_path(dir: &Path, scenario: &str) -> PathBuf {
    dir.join(format!("terminal_{scenario}.csv"))
}

/// Execute the suite command; returns true only if every scenario passed
pub fn execute(
    config: VerifierConfig,
    job: &str,
    scenarios: &[String],
    verbose: bool,
    output_dir: Option<&Path>,
) -> Result<bool> {
    let scenarios: Vec<String> = if scenarios.is_empty() {
        DEFAULT_SCENARIOS.iter().map(|s| s.to_string()).collect()
    } else {
        scenarios.to_vec()
    };

    let verifier = Verifier::new(config);
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in &scenarios {
        let first = JobId::for_scenario(job, scenario, 1)?;
        let second = JobId::for_scenario(job, scenario, 2)?;
        let report_path = output_dir.map(|dir| scenario_report_path(dir, scenario));

        let verification = run_pair(&verifier, &first, &second, verbose, report_path.as_deref())?;
        results.push((scenario.clone(), verification.passed()));
    }

    print_suite_summary(&results);
    Ok(results.iter().all(|(_, passed)| *passed))
}
