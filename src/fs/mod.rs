pub mod artifacts;
pub mod locator;
pub mod report;

pub use artifacts::{find_single, load_files, load_memory_map, load_pagemap};
pub use locator::ArtifactLocator;
pub use report::{persist, ReportFormat, ReportRecord};
