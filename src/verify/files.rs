//! Open file descriptor comparison
//!
//! Regular-file descriptors of both checkpoints are compared as unordered
//! collections. Files under the daemon's log output prefix are allowed to
//! appear on one side only, since every instance writes its own log.

use std::collections::HashSet;
use tracing::debug;

use crate::models::artifacts::FileDescriptorEntry;
use crate::models::constants::names;
use crate::models::result::ComparisonResult;

const DIFFERING_ENTRIES: &str = "differing entries";

/// Compare normalized file descriptor lists in both directions
pub fn compare_files(
    first: &[FileDescriptorEntry],
    second: &[FileDescriptorEntry],
    log_prefix: &str,
    verbose: bool,
) -> ComparisonResult {
    let first_keys: HashSet<String> = first.iter().map(|e| e.canonical_key()).collect();
    let second_keys: HashSet<String> = second.iter().map(|e| e.canonical_key()).collect();

    let unmatched = find_unmatched(first, &second_keys, log_prefix)
        .or_else(|| find_unmatched(second, &first_keys, log_prefix));

    match unmatched {
        None => ComparisonResult::pass(names::FILES),
        Some(entry) => {
            debug!(path = %entry.path, "file descriptor has no counterpart");
            if verbose {
                ComparisonResult::fail(
                    names::FILES,
                    format!("{DIFFERING_ENTRIES} ({})", entry.path),
                )
            } else {
                ComparisonResult::fail(names::FILES, DIFFERING_ENTRIES)
            }
        }
    }
}

fn find_unmatched<'a>(
    entries: &'a [FileDescriptorEntry],
    other_keys: &HashSet<String>,
    log_prefix: &str,
) -> Option<&'a FileDescriptorEntry> {
    entries
        .iter()
        .find(|e| !e.is_under(log_prefix) && !other_keys.contains(&e.canonical_key()))
}
