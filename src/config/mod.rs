//! Configuration management for search
//!
//! Settings that outlive a single invocation: whether `!` inverts patterns,
//! how the walker treats links, ignore files and hidden entries, and how
//! results are printed. Search criteria themselves (patterns, dates, sizes)
//! only ever come from the command line.
//!
//! Sources are layered with figment, lowest priority first:
//! 1. Embedded defaults (`default-config.toml`)
//! 2. `~/.config/search/config.{toml,json,yaml,yml}`, or the `--config` file
//! 3. `SEARCH_*` environment variables (`__` separates nested keys)
//! 4. Command-line flags

mod core;
mod smart_load;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::engine::{OutputFormat, WalkOptions};

/// Merged configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub patterns: PatternsConfig,
    pub walk: WalkOptions,
    pub output: OutputConfig,
}

/// Pattern parsing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternsConfig {
    /// Read a leading `!` as "must not match"
    pub negation: bool,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self { negation: true }
    }
}

/// Result output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Print a summary to stderr after the walk
    pub stats: bool,
}
