//! Typed, exclusion-filtered checkpoint records
//!
//! Each record is built from the raw CRIT JSON shape. Fields that vary
//! between independent checkpoints of the same process (object ids,
//! virtual addresses, shared memory ids) are named in the raw shape and
//! discarded during conversion, so a normalized record only carries fields
//! that take part in comparison.

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Attribute map of a record. Keys are kept sorted, so equality and the
/// canonical key do not depend on field order in the source document.
pub type Attributes = Map<String, Value>;

/// Top-level shape shared by every artifact: `{"entries": [...]}`
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub entries: Vec<T>,
}

/// One open regular file from `files.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptorEntry {
    /// Path name of the open file
    pub path: String,
    /// Remaining fields of the nested `reg` descriptor
    pub reg: Attributes,
    /// Remaining fields of the outer entry, including the type tag
    pub attributes: Attributes,
}

impl FileDescriptorEntry {
    pub fn is_under(&self, prefix: &str) -> bool {
        self.path.starts_with(prefix)
    }

    pub fn canonical_key(&self) -> String {
        let mut map = Attributes::new();
        map.insert("name".to_string(), Value::String(self.path.clone()));
        map.insert("reg".to_string(), Value::Object(self.reg.clone()));
        map.insert(
            "attributes".to_string(),
            Value::Object(self.attributes.clone()),
        );
        Value::Object(map).to_string()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawFileEntry {
    #[serde(default, rename = "id")]
    _id: Option<IgnoredAny>,
    reg: RawRegularFile,
    #[serde(flatten)]
    rest: Attributes,
}

#[derive(Debug, Deserialize)]
struct RawRegularFile {
    #[serde(default, rename = "id")]
    _id: Option<IgnoredAny>,
    name: String,
    #[serde(flatten)]
    rest: Attributes,
}

impl From<RawFileEntry> for FileDescriptorEntry {
    fn from(raw: RawFileEntry) -> Self {
        Self {
            path: raw.reg.name,
            reg: raw.reg.rest,
            attributes: raw.rest,
        }
    }
}

/// One virtual memory area with start, end and shmid removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRegion {
    pub attributes: Attributes,
}

impl MemoryRegion {
    pub fn canonical_key(&self) -> String {
        Value::Object(self.attributes.clone()).to_string()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawVma {
    #[serde(default, rename = "start")]
    _start: Option<IgnoredAny>,
    #[serde(default, rename = "end")]
    _end: Option<IgnoredAny>,
    #[serde(default, rename = "shmid")]
    _shmid: Option<IgnoredAny>,
    #[serde(flatten)]
    rest: Attributes,
}

impl From<RawVma> for MemoryRegion {
    fn from(raw: RawVma) -> Self {
        Self {
            attributes: raw.rest,
        }
    }
}

/// Process memory metadata from `mm-<pid>.json`, minus the address
/// boundaries that are placed differently on every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessMemoryMetadata {
    pub fields: Attributes,
    pub vmas: Vec<MemoryRegion>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMemoryMetadata {
    vmas: Vec<RawVma>,
    #[serde(default, rename = "mm_start_code")]
    _start_code: Option<IgnoredAny>,
    #[serde(default, rename = "mm_end_code")]
    _end_code: Option<IgnoredAny>,
    #[serde(default, rename = "mm_start_data")]
    _start_data: Option<IgnoredAny>,
    #[serde(default, rename = "mm_end_data")]
    _end_data: Option<IgnoredAny>,
    #[serde(default, rename = "mm_start_stack")]
    _start_stack: Option<IgnoredAny>,
    #[serde(default, rename = "mm_start_brk")]
    _start_brk: Option<IgnoredAny>,
    #[serde(default, rename = "mm_brk")]
    _brk: Option<IgnoredAny>,
    #[serde(default, rename = "mm_arg_start")]
    _arg_start: Option<IgnoredAny>,
    #[serde(default, rename = "mm_arg_end")]
    _arg_end: Option<IgnoredAny>,
    #[serde(default, rename = "mm_env_start")]
    _env_start: Option<IgnoredAny>,
    #[serde(default, rename = "mm_env_end")]
    _env_end: Option<IgnoredAny>,
    #[serde(default, rename = "mm_saved_auxv")]
    _saved_auxv: Option<IgnoredAny>,
    #[serde(flatten)]
    rest: Attributes,
}

impl From<RawMemoryMetadata> for ProcessMemoryMetadata {
    fn from(raw: RawMemoryMetadata) -> Self {
        Self {
            fields: raw.rest,
            vmas: raw.vmas.into_iter().map(MemoryRegion::from).collect(),
        }
    }
}

/// One page-table record from `pagemap-<pid>.json`, without its address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMapEntry {
    pub attributes: Attributes,
}

impl PageMapEntry {
    pub fn canonical_key(&self) -> String {
        Value::Object(self.attributes.clone()).to_string()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawPageMapEntry {
    #[serde(default, rename = "vaddr")]
    _vaddr: Option<IgnoredAny>,
    #[serde(flatten)]
    rest: Attributes,
}

impl From<RawPageMapEntry> for PageMapEntry {
    fn from(raw: RawPageMapEntry) -> Self {
        Self {
            attributes: raw.rest,
        }
    }
}

/// Page-residency artifact: the leading index record plus per-page entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMap {
    pub index: Attributes,
    pub entries: Vec<PageMapEntry>,
}
