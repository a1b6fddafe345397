use anyhow::Result;
use ckpt_verify::commands::{locate, suite, verify};
use ckpt_verify::config::VerifierConfig;

use super::types::{job_id, Commands, ConfigOverrides};

/// Apply command-line overrides on top of the loaded configuration
pub fn apply_overrides(mut config: VerifierConfig, overrides: &ConfigOverrides) -> Result<VerifierConfig> {
    if let Some(root) = &overrides.root {
        config.checkpoint_root = root.clone();
    }
    if let Some(threshold) = overrides.threshold {
        config.page_miss_threshold = threshold;
    }
    if let Some(pairing) = overrides.pairing {
        config.pagemap_pairing = pairing;
    }
    if overrides.parallel {
        config.parallel = true;
    }
    if overrides.no_diagnostic {
        config.diagnostic.enabled = false;
    }
    config.validate()?;
    Ok(config)
}

/// Run a command; `Ok(false)` means verification completed with a FAIL verdict
pub fn dispatch(command: Commands, config: VerifierConfig) -> Result<bool> {
    match command {
        Commands::Verify {
            first,
            second,
            verbose,
            output,
        } => verify::execute(
            config,
            &job_id(&first)?,
            &job_id(&second)?,
            verbose,
            output.as_deref(),
        ),
        Commands::Suite {
            job,
            scenarios,
            verbose,
            output_dir,
        } => suite::execute(config, &job, &scenarios, verbose, output_dir.as_deref()),
        Commands::Locate { job } => {
            locate::execute(&config, &job_id(&job)?)?;
            Ok(true)
        }
    }
}
