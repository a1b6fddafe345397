//! Comparison verdicts and the aggregated verification report

use serde::{Deserialize, Serialize};

use super::constants::names;

/// Verdict of one comparator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub name: String,
    pub passed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ComparisonResult {
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            reason: None,
        }
    }

    pub fn fail(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            reason: Some(reason.into()),
        }
    }
}

/// Per-comparator results plus the overall conjunction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    results: Vec<ComparisonResult>,
    overall: ComparisonResult,
}

impl VerificationReport {
    /// Build the report; the overall verdict is the AND of every result
    pub fn new(results: Vec<ComparisonResult>) -> Self {
        let overall = if results.iter().all(|r| r.passed) {
            ComparisonResult::pass(names::OVERALL)
        } else {
            ComparisonResult::fail(names::OVERALL, names::OVERALL_FAILURE)
        };
        Self { results, overall }
    }

    pub fn results(&self) -> &[ComparisonResult] {
        &self.results
    }

    pub fn overall(&self) -> &ComparisonResult {
        &self.overall
    }

    pub fn passed(&self) -> bool {
        self.overall.passed
    }

    pub fn get(&self, name: &str) -> Option<&ComparisonResult> {
        self.rows().find(|r| r.name == name)
    }

    /// Every result in report order, overall last
    pub fn rows(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.results.iter().chain(std::iter::once(&self.overall))
    }
}
