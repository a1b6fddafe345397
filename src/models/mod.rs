pub mod artifacts;
pub mod constants;
pub mod job;
pub mod result;

pub use artifacts::{
    Attributes, FileDescriptorEntry, MemoryRegion, PageMap, PageMapEntry, ProcessMemoryMetadata,
};
pub use job::{CheckpointDirectory, JobId};
pub use result::{ComparisonResult, VerificationReport};
