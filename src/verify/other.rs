//! Byte-for-byte comparison of the remaining metadata artifacts

use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, VerifyError};
use crate::fs::artifacts::other_artifact_paths;
use crate::models::constants::names;
use crate::models::result::ComparisonResult;

/// Compare inventory, fdinfo, seccomp and filesystem state artifacts.
///
/// A missing artifact or an ambiguous `fs-*.json` is fatal. In verbose mode
/// the reason names the first pair of differing files.
pub fn compare_other(first: &Path, second: &Path, verbose: bool) -> Result<ComparisonResult> {
    let first_paths = other_artifact_paths(first)?;
    let second_paths = other_artifact_paths(second)?;

    let mut first_difference = None;
    for (a, b) in first_paths.iter().zip(&second_paths) {
        let content_a = fs::read(a).map_err(|e| VerifyError::malformed(a, e))?;
        let content_b = fs::read(b).map_err(|e| VerifyError::malformed(b, e))?;
        if content_a != content_b {
            debug!(
                first = %a.display(),
                first_sha256 = %sha256_hex(&content_a),
                second = %b.display(),
                second_sha256 = %sha256_hex(&content_b),
                "metadata artifacts differ"
            );
            first_difference.get_or_insert((a, b));
        }
    }

    Ok(match first_difference {
        None => ComparisonResult::pass(names::OTHER),
        Some((a, b)) if verbose => ComparisonResult::fail(
            names::OTHER,
            format!("{} and {} differ", a.display(), b.display()),
        ),
        Some(_) => ComparisonResult::fail(names::OTHER, "other files differ"),
    })
}

fn sha256_hex(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}
