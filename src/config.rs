//! Verifier configuration
//!
//! Settings are read from an optional TOML file. Every key has a default,
//! so a missing default config file is equivalent to an empty one.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, VerifyError};
use crate::models::constants::{
    DEFAULT_ARCHIVE_EXTENSION, DEFAULT_CHECKPOINT_ROOT, DEFAULT_DIAGNOSTIC_TIMEOUT_SECS,
    DEFAULT_LOG_OUTPUT_PREFIX, DEFAULT_PAGE_MISS_THRESHOLD,
};
use crate::verify::pagemap::PagePairing;

const CONFIG_DIR_NAME: &str = "ckpt-verify";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// Directory holding one subdirectory per checkpoint
    pub checkpoint_root: PathBuf,
    /// Extension of checkpoint archives that must not be selected
    pub archive_extension: String,
    /// Descriptors under this path prefix may differ between checkpoints
    pub log_output_prefix: String,
    /// Pagemap comparison fails once the miss ratio reaches this value
    pub page_miss_threshold: f64,
    pub pagemap_pairing: PagePairing,
    /// Run the comparators on separate threads
    pub parallel: bool,
    pub diagnostic: DiagnosticConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            checkpoint_root: PathBuf::from(DEFAULT_CHECKPOINT_ROOT),
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            log_output_prefix: DEFAULT_LOG_OUTPUT_PREFIX.to_string(),
            page_miss_threshold: DEFAULT_PAGE_MISS_THRESHOLD,
            pagemap_pairing: PagePairing::default(),
            parallel: false,
            diagnostic: DiagnosticConfig::default(),
        }
    }
}

/// External "show checkpoint contents" command run in verbose mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticConfig {
    pub enabled: bool,
    pub program: String,
    /// Arguments placed before the checkpoint directory path
    pub args: Vec<String>,
    pub timeout_secs: u64,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: "cedana".to_string(),
            args: vec!["perf".to_string(), "crit".to_string(), "show".to_string()],
            timeout_secs: DEFAULT_DIAGNOSTIC_TIMEOUT_SECS,
        }
    }
}

impl DiagnosticConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl VerifierConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user config file
    /// is used when present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            VerifyError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| VerifyError::Config(format!("{}: {e}", path.display())))?;
        config.expand_paths();
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| VerifyError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.page_miss_threshold > 0.0 && self.page_miss_threshold <= 1.0) {
            return Err(VerifyError::Config(format!(
                "page_miss_threshold must be within (0, 1], got {}",
                self.page_miss_threshold
            )));
        }
        if self.archive_extension.is_empty() {
            return Err(VerifyError::Config(
                "archive_extension cannot be empty".to_string(),
            ));
        }
        if self.diagnostic.enabled && self.diagnostic.program.trim().is_empty() {
            return Err(VerifyError::Config(
                "diagnostic.program cannot be empty when the diagnostic is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Expand `~` and environment variables in path settings
    pub fn expand_paths(&mut self) {
        let root = self.checkpoint_root.to_string_lossy();
        self.checkpoint_root = PathBuf::from(expand_env_vars(&expand_tilde(&root)));
        self.log_output_prefix = expand_env_vars(&expand_tilde(&self.log_output_prefix));
    }
}

/// `<config_dir>/ckpt-verify/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Expand ~ to home directory in paths
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        if let Ok(home) = env::var("HOME") {
            return path.replacen('~', &home, 1);
        }
    }
    path.to_string()
}

/// Expand ${ENV_VAR} and $ENV_VAR patterns, keeping unknown variables as-is
pub fn expand_env_vars(s: &str) -> String {
    let re = regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)")
        .expect("Invalid regex pattern");

    re.replace_all(s, |caps: &regex::Captures| {
        let name = caps.get(1).or_else(|| caps.get(2));
        name.and_then(|n| env::var(n.as_str()).ok())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .to_string()
}
