//! Metadata filtering - applied before any pattern work
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. **Type** - file or directory
//! 2. **After** - modified at or after the lower bound
//! 3. **Before** - modified at or before the upper bound
//! 4. **Size** - at least the minimum byte count
//!
//! Every check is vacuous when its bound is unset, so an empty
//! [`MetadataFilterConfig`] admits every entry.

use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::error::ConfigError;

/// Snapshot of a visited entry, taken when the walker reaches it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub modified: DateTime<Utc>,
    pub size: u64,
}

impl FileEntry {
    /// Build an entry from already-fetched metadata.
    ///
    /// Fails only when the platform cannot report a modification time.
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> io::Result<Self> {
        Ok(FileEntry {
            is_dir: metadata.is_dir(),
            modified: DateTime::<Utc>::from(metadata.modified()?),
            size: metadata.len(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The pathname as raw bytes, for matching and printing
    pub fn pathname(&self) -> &[u8] {
        self.path.as_os_str().as_encoded_bytes()
    }
}

/// Which entry types to admit. Empty admits both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeMask {
    files: bool,
    directories: bool,
}

impl TypeMask {
    pub const ANY: TypeMask = TypeMask { files: false, directories: false };
    pub const FILES: TypeMask = TypeMask { files: true, directories: false };
    pub const DIRECTORIES: TypeMask = TypeMask { files: false, directories: true };

    pub fn is_empty(&self) -> bool {
        !self.files && !self.directories
    }

    pub fn admits(&self, is_dir: bool) -> bool {
        if self.is_empty() {
            return true;
        }
        if is_dir { self.directories } else { self.files }
    }
}

impl FromStr for TypeMask {
    type Err = ConfigError;

    /// Any combination of `f` and `d`; the empty string admits both
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut mask = TypeMask::default();
        for c in value.chars() {
            match c {
                'f' => mask.files = true,
                'd' => mask.directories = true,
                _ => return Err(ConfigError::InvalidType(value.to_string())),
            }
        }
        Ok(mask)
    }
}

/// Type, date and size bounds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFilterConfig {
    pub types: TypeMask,
    pub after: Option<DateTime<Utc>>,
    pub before: Option<DateTime<Utc>>,
    pub min_size: Option<u64>,
}

/// Decision for whether to process or skip an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Continue to the pattern stages
    Process,
    /// Skip this entry with a reason
    Skip(&'static str),
}

#[derive(Debug, Clone, Default)]
pub struct MetadataFilter {
    config: MetadataFilterConfig,
}

impl MetadataFilter {
    pub fn new(config: MetadataFilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MetadataFilterConfig {
        &self.config
    }

    pub fn passes(&self, entry: &FileEntry) -> bool {
        self.decide(entry) == FilterDecision::Process
    }

    /// Run the checks in order, reporting the first one that fails
    pub fn decide(&self, entry: &FileEntry) -> FilterDecision {
        let config = &self.config;

        if !config.types.admits(entry.is_dir) {
            return FilterDecision::Skip("type");
        }
        if config.after.is_some_and(|after| entry.modified < after) {
            return FilterDecision::Skip("modified before --after");
        }
        if config.before.is_some_and(|before| entry.modified > before) {
            return FilterDecision::Skip("modified after --before");
        }
        if config.min_size.is_some_and(|min| entry.size < min) {
            return FilterDecision::Skip("smaller than --size");
        }

        FilterDecision::Process
    }
}
