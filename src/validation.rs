//! Input validation for job identifiers.
//!
//! Job identifiers are used as directory name prefixes under the checkpoint
//! root, so they are checked before any path is built from them.

use anyhow::{bail, Result};

/// Maximum allowed length for job identifiers.
pub const MAX_ID_LENGTH: usize = 128;

/// Names that would resolve outside of, or to, the checkpoint root itself.
const RESERVED_NAMES: &[&str] = &[".", ".."];

/// Validates that a job identifier is safe to use as a path prefix.
///
/// An ID is valid if:
/// - It is not empty
/// - It is no longer than MAX_ID_LENGTH characters
/// - It contains only alphanumeric characters, dashes, underscores and dots
/// - It is not `.` or `..`
///
/// # Examples
///
/// ```
/// use ckpt_verify::validation::validate_id;
///
/// assert!(validate_id("nn-1gb-base").is_ok());
/// assert!(validate_id("job_2024.1").is_ok());
/// assert!(validate_id("").is_err());
/// assert!(validate_id("../etc/passwd").is_err());
/// ```
pub fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("Job ID cannot be empty");
    }

    if id.len() > MAX_ID_LENGTH {
        bail!(
            "Job ID too long: {} characters (max {})",
            id.len(),
            MAX_ID_LENGTH
        );
    }

    let valid_chars = id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_chars {
        bail!("Job ID '{id}' contains invalid characters. Use only alphanumeric characters, dashes (-), underscores (_) and dots (.)");
    }

    if RESERVED_NAMES.contains(&id) {
        bail!("Job ID '{id}' uses a reserved name");
    }

    Ok(())
}

/// Clap value parser for validating job ID arguments.
pub fn clap_id_validator(s: &str) -> Result<String, String> {
    validate_id(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
