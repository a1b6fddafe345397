//! Artifact loading and normalization
//!
//! Reads CRIT JSON artifacts out of a checkpoint directory and converts them
//! into the typed records in [`crate::models::artifacts`], dropping volatile
//! fields on the way. Any problem reading or shaping an artifact is fatal:
//! it means the checkpoint format is not one this verifier understands.

use glob::{glob, Pattern};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Result, VerifyError};
use crate::models::artifacts::{
    Envelope, FileDescriptorEntry, PageMap, PageMapEntry, ProcessMemoryMetadata, RawFileEntry,
    RawMemoryMetadata, RawPageMapEntry,
};
use crate::models::constants::artifacts;

/// Resolve a name pattern such as `mm-*.json` to exactly one file.
///
/// Zero or several matches violate the singularity precondition.
pub fn find_single(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let full_pattern = format!("{}/{}", Pattern::escape(&dir.to_string_lossy()), pattern);
    let mut matches = Vec::new();
    for entry in glob(&full_pattern)
        .map_err(|e| VerifyError::malformed(dir, format!("invalid pattern '{pattern}': {e}")))?
    {
        let path = entry.map_err(|e| VerifyError::malformed(e.path(), e.error().to_string()))?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.len() != 1 {
        return Err(VerifyError::ArtifactCount {
            dir: dir.to_path_buf(),
            pattern: pattern.to_string(),
            found: matches.len(),
        });
    }
    Ok(matches.remove(0))
}

/// Read and deserialize one JSON artifact
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read(path).map_err(|e| VerifyError::malformed(path, e))?;
    serde_json::from_slice(&content).map_err(|e| VerifyError::malformed(path, e))
}

fn read_entries<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let envelope: Envelope<T> = read_json(path)?;
    Ok(envelope.entries)
}

fn is_regular_file(entry: &Value) -> bool {
    entry
        .get("type")
        .or_else(|| entry.get("TYPE"))
        .and_then(Value::as_str)
        == Some(artifacts::REGULAR_FILE_TAG)
}

/// Regular-file entries of `files.json`, ids removed
pub fn load_files(dir: &Path) -> Result<Vec<FileDescriptorEntry>> {
    let path = dir.join(artifacts::FILES);
    let raw: Vec<Value> = read_entries(&path)?;
    let total = raw.len();

    let entries = raw
        .into_iter()
        .enumerate()
        .filter(|(_, entry)| is_regular_file(entry))
        .map(|(i, entry)| {
            serde_json::from_value::<RawFileEntry>(entry)
                .map(FileDescriptorEntry::from)
                .map_err(|e| VerifyError::malformed(&path, format!("entry {i}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(
        path = %path.display(),
        total,
        regular = entries.len(),
        "loaded file descriptor entries"
    );
    Ok(entries)
}

/// The process memory record of the single `mm-*.json`
pub fn load_memory_map(dir: &Path) -> Result<ProcessMemoryMetadata> {
    let path = find_single(dir, artifacts::MM_PATTERN)?;
    let mut entries: Vec<RawMemoryMetadata> = read_entries(&path)?;
    if entries.is_empty() {
        return Err(VerifyError::malformed(&path, "no memory map entries"));
    }
    if entries.len() > 1 {
        warn!(
            path = %path.display(),
            count = entries.len(),
            "memory map has more than one entry, comparing the first"
        );
    }

    let mm = ProcessMemoryMetadata::from(entries.swap_remove(0));
    debug!(path = %path.display(), vmas = mm.vmas.len(), "loaded memory map");
    Ok(mm)
}

/// The single `pagemap-*.json`, split into index record and page entries
pub fn load_pagemap(dir: &Path) -> Result<PageMap> {
    let path = find_single(dir, artifacts::PAGEMAP_PATTERN)?;
    let mut raw: Vec<Value> = read_entries(&path)?;
    if raw.is_empty() {
        return Err(VerifyError::malformed(&path, "missing pagemap index record"));
    }

    let index = match raw.remove(0) {
        Value::Object(index) => index,
        other => {
            return Err(VerifyError::malformed(
                &path,
                format!("pagemap index record is not an object: {other}"),
            ))
        }
    };

    let entries = raw
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            serde_json::from_value::<RawPageMapEntry>(entry)
                .map(PageMapEntry::from)
                .map_err(|e| VerifyError::malformed(&path, format!("page entry {i}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(path = %path.display(), pages = entries.len(), "loaded pagemap");
    Ok(PageMap { index, entries })
}

/// Paths of the metadata artifacts compared byte for byte, in report order:
/// the fixed names followed by the single `fs-*.json`.
pub fn other_artifact_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(artifacts::OTHER.len() + 1);
    for name in artifacts::OTHER {
        let path = dir.join(name);
        if !path.is_file() {
            return Err(VerifyError::malformed(&path, "artifact is missing"));
        }
        paths.push(path);
    }
    paths.push(find_single(dir, artifacts::FS_PATTERN)?);
    Ok(paths)
}
