//! Console rendering of verification reports

use colored::{ColoredString, Colorize};

use crate::models::job::JobId;
use crate::models::result::ComparisonResult;
use crate::verify::Verification;

const SEPARATOR_WIDTH: usize = 20;

pub fn status_label(passed: bool) -> ColoredString {
    if passed {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    }
}

pub fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// One report line: `PASS files test` or `FAIL mm test: differing vmas`
pub fn format_result(result: &ComparisonResult) -> String {
    match (&result.reason, result.passed) {
        (Some(reason), false) => {
            format!("{} {}: {}", status_label(false), result.name, reason)
        }
        _ => format!("{} {}", status_label(result.passed), result.name),
    }
}

pub fn print_header(first: &JobId, second: &JobId) {
    println!("DIFFING JOBS \"{first}\" AND \"{second}\"...");
}

/// Resolved directories, then one line per comparator and the overall line
pub fn report_lines(verification: &Verification) -> Vec<String> {
    let report = &verification.report;
    let mut lines = vec![
        format!("FOUND {}/...", verification.first.path.display()),
        format!("FOUND {}/...", verification.second.path.display()),
        separator(),
        "TESTING...".to_string(),
    ];
    lines.extend(report.results().iter().map(format_result));
    lines.push(separator());
    lines.push(format_result(report.overall()));
    lines
}

/// Per-scenario verdicts followed by the overall correctness line
pub fn print_suite_summary(results: &[(String, bool)]) {
    println!();
    for (name, passed) in results {
        println!("{} {} test", status_label(*passed), name);
    }
    println!("{}", separator());
    let overall = results.iter().all(|(_, passed)| *passed);
    println!("{} {}", status_label(overall), "CORRECTNESS".bold());
}
