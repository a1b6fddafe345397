pub mod commands;
pub mod config;
pub mod error;
pub mod fs;
pub mod models;
pub mod validation;
pub mod verify;

pub use config::VerifierConfig;
pub use error::VerifyError;
pub use models::{ComparisonResult, JobId, VerificationReport};
pub use verify::{verify, Verification, Verifier};
