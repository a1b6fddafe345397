pub mod dispatch;
pub mod types;

pub use dispatch::{apply_overrides, dispatch};
pub use types::Cli;
