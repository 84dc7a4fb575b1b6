//! Search engine - metadata, name and content filtering over a directory walk
//!
//! Entries flow through three stages, cheapest first:
//!
//! ```text
//! walk ──▶ MetadataFilter ──▶ NamePredicate ──▶ ContentPredicate
//!          type/date/size      OR over names     AND per line
//! ```
//!
//! Each stage may end an entry's evaluation. The content stage is the only
//! one that opens files.

pub mod content;
pub mod core;
pub mod directory;
pub mod metadata;
pub mod options;
pub mod patterns;
pub mod printer;
pub mod types;

// Re-export main types for easier access
pub use content::ContentScan;
pub use self::core::SearchEngine;
pub use directory::WalkOptions;
pub use metadata::{FileEntry, FilterDecision, MetadataFilter, MetadataFilterConfig, TypeMask};
pub use options::{SearchOptions, SearchOptionsBuilder};
pub use patterns::{ContentPredicate, NamePredicate, Pattern, Polarity};
pub use printer::Printer;
pub use types::{OutputFormat, Outcome, SearchStats};
