//! # search - find and grep in a single pass
//!
//! `search` walks one or more directory trees and prints every entry that
//! passes a composed filter:
//!
//! - **Metadata**: entry type (`f`, `d`), modification-time bounds and a
//!   minimum size, checked first because they cost nothing beyond the stat
//!   the walk already did.
//! - **Names**: case-insensitive regular expressions over the pathname,
//!   combined with OR. A leading `!` inverts a pattern.
//! - **Contents**: case-insensitive regular expressions over each line of
//!   the file, combined with AND. Every satisfying line is printed as
//!   `path:line`.
//!
//! ## Quick Start
//!
//! ```bash
//! # Every Rust source file under src/
//! search -n '\.rs$' src
//!
//! # Lines mentioning TODO but not FIXME, in files modified this year
//! search -a 2026 -c todo -c '!fixme'
//!
//! # Directories only
//! search -t d
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use search::engine::{Printer, SearchEngine, SearchOptions};
//! use search::engine::types::OutputFormat;
//!
//! let options = SearchOptions::builder()
//!     .name_pattern(r"\.toml$")?
//!     .content_pattern("edition")?
//!     .root(".")
//!     .build();
//!
//! let engine = SearchEngine::new(options);
//! let mut printer = Printer::new(std::io::stdout().lock(), OutputFormat::Text);
//! let stats = engine.run(&mut printer, |error| eprintln!("{error}"))?;
//! eprintln!("{} lines matched", stats.lines_matched);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod shared;

pub use cli::{Cli, Output};
pub use config::SearchConfig;
pub use engine::{SearchEngine, SearchOptions};
pub use error::{ConfigError, SearchError};

/// Result type alias for CLI-level operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
