use anyhow::Result;
use ckpt_verify::config::VerifierConfig;
use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{apply_overrides, dispatch, Cli};

/// Exit status when verification completed but found a divergence
const EXIT_VERIFICATION_FAILED: u8 = 1;
/// Exit status when verification could not complete
const EXIT_FATAL: u8 = 2;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let config = VerifierConfig::load(cli.config.as_deref())?;
    let config = apply_overrides(config, &cli.overrides)?;
    dispatch(cli.command, config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_VERIFICATION_FAILED),
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::from(EXIT_FATAL)
        }
    }
}
