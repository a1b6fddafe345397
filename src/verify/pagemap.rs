//! Fuzzy page residency comparison
//!
//! Page residency legitimately churns between two runs of the same workload
//! (scheduling, dirtying, reclaim), so per-page entries are compared with a
//! tolerance: the comparison passes while the fraction of entries without a
//! counterpart stays strictly below the miss threshold. The leading index
//! record is structural and must match exactly.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::models::artifacts::{PageMap, PageMapEntry};
use crate::models::constants::names;
use crate::models::result::ComparisonResult;

/// How page entries of the two checkpoints are paired when counting misses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePairing {
    /// Walk both lists in step, truncated to the shorter one. A position
    /// misses when either entry is absent from the other list.
    #[default]
    Positional,
    /// Every entry of the first list consumes one equal entry of the
    /// second; entries left without a partner are misses.
    Multiset,
}

impl std::fmt::Display for PagePairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PagePairing::Positional => write!(f, "positional"),
            PagePairing::Multiset => write!(f, "multiset"),
        }
    }
}

impl std::str::FromStr for PagePairing {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "positional" => Ok(PagePairing::Positional),
            "multiset" => Ok(PagePairing::Multiset),
            _ => anyhow::bail!("Invalid pagemap pairing: {s}. Use: positional, multiset"),
        }
    }
}

/// Number of page entries of `first` without a counterpart in `second`
pub fn count_misses(first: &[PageMapEntry], second: &[PageMapEntry], pairing: PagePairing) -> usize {
    let first_keys: Vec<String> = first.iter().map(PageMapEntry::canonical_key).collect();
    let second_keys: Vec<String> = second.iter().map(PageMapEntry::canonical_key).collect();

    match pairing {
        PagePairing::Positional => {
            let first_set: HashSet<&str> = first_keys.iter().map(String::as_str).collect();
            let second_set: HashSet<&str> = second_keys.iter().map(String::as_str).collect();
            first_keys
                .iter()
                .zip(&second_keys)
                .filter(|(a, b)| !second_set.contains(a.as_str()) || !first_set.contains(b.as_str()))
                .count()
        }
        PagePairing::Multiset => {
            let mut available: HashMap<&str, usize> = HashMap::new();
            for key in &second_keys {
                *available.entry(key.as_str()).or_default() += 1;
            }
            first_keys
                .iter()
                .filter(|key| match available.get_mut(key.as_str()) {
                    Some(count) if *count > 0 => {
                        *count -= 1;
                        false
                    }
                    _ => true,
                })
                .count()
        }
    }
}

pub fn compare_pagemaps(
    first: &PageMap,
    second: &PageMap,
    threshold: f64,
    pairing: PagePairing,
) -> ComparisonResult {
    if first.index != second.index {
        return ComparisonResult::fail(names::PAGEMAP, "differing indices");
    }

    if first.entries.is_empty() {
        return if second.entries.is_empty() {
            ComparisonResult::pass(names::PAGEMAP)
        } else {
            ComparisonResult::fail(
                names::PAGEMAP,
                format!(
                    "no page entries in first checkpoint, {} in second",
                    second.entries.len()
                ),
            )
        };
    }

    let misses = count_misses(&first.entries, &second.entries, pairing);
    let ratio = misses as f64 / first.entries.len() as f64;
    debug!(
        misses,
        first = first.entries.len(),
        second = second.entries.len(),
        ratio,
        %pairing,
        "pagemap miss ratio"
    );

    if ratio < threshold {
        ComparisonResult::pass(names::PAGEMAP)
    } else {
        ComparisonResult::fail(
            names::PAGEMAP,
            format!("misses / len(entries) = {ratio} should be < {threshold}"),
        )
    }
}
