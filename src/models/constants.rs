/// Directory the checkpoint daemon writes terminal checkpoints into.
pub const DEFAULT_CHECKPOINT_ROOT: &str = "/terminal-ckpt";

/// Extension of archived checkpoints, which sit next to the directories
/// they were made from and must never be selected.
pub const DEFAULT_ARCHIVE_EXTENSION: &str = ".tar";

/// Path prefix of the daemon's per-job output logs. Each instance logs to
/// its own file, so descriptors under this prefix are expected to differ.
pub const DEFAULT_LOG_OUTPUT_PREFIX: &str = "/var/log/cedana-output";

/// Page miss ratio at or above which the pagemap comparison fails.
pub const DEFAULT_PAGE_MISS_THRESHOLD: f64 = 0.25;

/// Default timeout for the diagnostic "show" command, in seconds.
pub const DEFAULT_DIAGNOSTIC_TIMEOUT_SECS: u64 = 120;

/// Checkpoint artifact names and patterns.
pub mod artifacts {
    pub const FILES: &str = "files.json";
    pub const MM_PATTERN: &str = "mm-*.json";
    pub const PAGEMAP_PATTERN: &str = "pagemap-*.json";
    pub const FS_PATTERN: &str = "fs-*.json";

    /// Metadata artifacts that must be byte-identical between checkpoints.
    pub const OTHER: &[&str] = &["inventory.json", "fdinfo-2.json", "seccomp.json"];

    /// File-type tag of regular files in the file-descriptor artifact.
    pub const REGULAR_FILE_TAG: &str = "REG";
}

/// Names of the comparators as they appear in reports.
pub mod names {
    pub const FILES: &str = "files test";
    pub const MM: &str = "mm test";
    pub const PAGEMAP: &str = "pagemap test";
    pub const OTHER: &str = "other test";
    pub const OVERALL: &str = "overall";

    /// Reason attached to a failing overall verdict.
    pub const OVERALL_FAILURE: &str = ">0 diff failed";
}
