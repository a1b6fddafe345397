use ckpt_verify::models::job::JobId;
use ckpt_verify::validation::clap_id_validator;
use ckpt_verify::verify::PagePairing;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ckpt-verify")]
#[command(about = "Checkpoint image correctness verifier", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

/// Command-line values that take precedence over the configuration file
#[derive(Args, Debug, Default)]
pub struct ConfigOverrides {
    /// Directory holding the checkpoint directories
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Pagemap miss ratio at which verification fails (default: 0.25)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Pagemap entry pairing: positional or multiset
    #[arg(long, global = true)]
    pub pairing: Option<PagePairing>,

    /// Run the comparators in parallel
    #[arg(long, global = true)]
    pub parallel: bool,

    /// Skip the external show command in verbose mode
    #[arg(long, global = true)]
    pub no_diagnostic: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify that two checkpointed jobs hold equivalent state
    Verify {
        /// Job ID of the first instance (checkpoint directory name prefix)
        #[arg(value_parser = clap_id_validator)]
        first: String,

        /// Job ID of the second instance
        #[arg(value_parser = clap_id_validator)]
        second: String,

        /// Print every comparison and run the diagnostic show command
        #[arg(short, long)]
        verbose: bool,

        /// Save the report (.csv table, or .json record)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify all correctness scenarios of a workload (<job>-<scenario>-1 vs -2)
    Suite {
        /// Workload job prefix, e.g. nn-1gb
        #[arg(value_parser = clap_id_validator)]
        job: String,

        /// Scenario to verify; repeatable (default: base, c2r2, c1c2r1r2, c1r1c2r2, c2r2c2r2)
        #[arg(short, long = "scenario", value_parser = clap_id_validator)]
        scenarios: Vec<String>,

        /// Print every comparison and run the diagnostic show command
        #[arg(short, long)]
        verbose: bool,

        /// Directory for per-scenario terminal_<scenario>.csv reports
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Print the checkpoint directory a job resolves to
    Locate {
        /// Job ID (checkpoint directory name prefix)
        #[arg(value_parser = clap_id_validator)]
        job: String,
    },
}

pub fn job_id(id: &str) -> anyhow::Result<JobId> {
    JobId::new(id)
}
