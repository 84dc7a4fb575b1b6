//! Error types for configuration and searching
//!
//! Configuration errors are fatal and surface before the walk starts.
//! Search errors are mostly recoverable: the engine reports them and moves
//! on to the next entry. Only a failure to write output stops a search.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the arguments or configuration, detected at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid date-time '{0}' (expected YYYY[-MM[-DD[ HH[:MM[:SS[ ZONE]]]]]])")]
    InvalidDate(String),

    #[error("invalid size '{value}': {reason}")]
    InvalidSize { value: String, reason: String },

    #[error("invalid type '{0}': use any combination of 'f' (file) and 'd' (directory)")]
    InvalidType(String),

    #[error("configuration file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("failed to load configuration: {0}")]
    Load(String),
}

/// Errors raised while walking roots or scanning file contents
#[derive(Error, Debug)]
pub enum SearchError {
    /// An entry could not be listed or statted by the walker
    #[error("{0}")]
    Traversal(#[from] ignore::Error),

    /// Metadata was readable but incomplete (e.g. no modification time)
    #[error("{}: {source}", path.display())]
    TraversalIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file could not be opened or read for content matching
    #[error("{}: {source}", path.display())]
    ContentRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing results failed; the search cannot continue
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

impl SearchError {
    /// Whether the walk can continue past this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SearchError::Output(_))
    }

    /// True when stdout was closed by the reader (e.g. piped into `head`)
    pub fn is_broken_pipe(&self) -> bool {
        matches!(self, SearchError::Output(e) if e.kind() == io::ErrorKind::BrokenPipe)
    }
}
