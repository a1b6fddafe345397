//! Memory map comparison
//!
//! Scalar fields must match exactly. VMAs are compared as unordered
//! collections: every region of one checkpoint must occur in the other.

use std::collections::HashSet;

use crate::models::artifacts::{MemoryRegion, ProcessMemoryMetadata};
use crate::models::constants::names;
use crate::models::result::ComparisonResult;

pub fn compare_memory_maps(
    first: &ProcessMemoryMetadata,
    second: &ProcessMemoryMetadata,
    verbose: bool,
) -> ComparisonResult {
    if first.fields != second.fields {
        let reason = if verbose {
            format!("differing fields ({})", differing_keys(first, second).join(", "))
        } else {
            "differing fields".to_string()
        };
        return ComparisonResult::fail(names::MM, reason);
    }

    if !contains_all(&first.vmas, &second.vmas) || !contains_all(&second.vmas, &first.vmas) {
        return ComparisonResult::fail(names::MM, "differing vmas");
    }

    ComparisonResult::pass(names::MM)
}

fn contains_all(needles: &[MemoryRegion], haystack: &[MemoryRegion]) -> bool {
    let keys: HashSet<String> = haystack.iter().map(MemoryRegion::canonical_key).collect();
    needles.iter().all(|vma| keys.contains(&vma.canonical_key()))
}

fn differing_keys(first: &ProcessMemoryMetadata, second: &ProcessMemoryMetadata) -> Vec<String> {
    let mut keys: Vec<String> = first
        .fields
        .keys()
        .chain(second.fields.keys())
        .filter(|k| first.fields.get(*k) != second.fields.get(*k))
        .cloned()
        .collect();
    keys.sort();
    keys.dedup();
    keys
}
