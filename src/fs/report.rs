//! Verification report persistence
//!
//! Reports are archived next to benchmark metrics, either as a CSV table
//! (`name,result,error`, one row per comparator plus `overall`) or as a JSON
//! record carrying the resolved directories and run metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::error::{Result, VerifyError};
use crate::models::job::CheckpointDirectory;
use crate::models::result::{ComparisonResult, VerificationReport};
use crate::verify::Verification;

const CSV_HEADER: [&str; 3] = ["name", "result", "error"];

/// Output format, chosen from the destination's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Json,
}

impl ReportFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Csv,
        }
    }
}

/// Archived form of one verification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRecord {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub first: CheckpointDirectory,
    pub second: CheckpointDirectory,
    pub passed: bool,
    /// Comparator results followed by the overall result
    pub results: Vec<ComparisonResult>,
}

impl ReportRecord {
    pub fn new(verification: &Verification) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            first: verification.first.clone(),
            second: verification.second.clone(),
            passed: verification.passed(),
            results: verification.report.rows().cloned().collect(),
        }
    }
}

/// Write a verification to `path` in the format its extension selects
pub fn persist(verification: &Verification, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    match ReportFormat::from_path(path) {
        ReportFormat::Csv => write_csv(&verification.report, path),
        ReportFormat::Json => write_json(&ReportRecord::new(verification), path),
    }
}

pub fn write_csv(report: &VerificationReport, path: &Path) -> Result<()> {
    let persist_err = |e: csv::Error| VerifyError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut writer = csv::Writer::from_path(path).map_err(persist_err)?;
    writer.write_record(CSV_HEADER).map_err(persist_err)?;
    for row in report.rows() {
        writer
            .write_record([
                row.name.as_str(),
                if row.passed { "True" } else { "False" },
                row.reason.as_deref().unwrap_or(""),
            ])
            .map_err(persist_err)?;
    }
    writer.flush().map_err(|e| VerifyError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn write_json(record: &ReportRecord, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(record).map_err(|e| VerifyError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    fs::write(path, json).map_err(|e| VerifyError::Persist {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub fn load_json(path: &Path) -> Result<ReportRecord> {
    let json = fs::read_to_string(path).map_err(|e| VerifyError::malformed(path, e))?;
    serde_json::from_str(&json).map_err(|e| VerifyError::malformed(path, e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| VerifyError::Persist {
                path: path.to_path_buf(),
                reason: format!("cannot create {}: {e}", parent.display()),
            })
        }
        _ => Ok(()),
    }
}
