//! Directory traversal
//!
//! Wraps `ignore::WalkBuilder` into a depth-first, lazy stream of
//! [`FileEntry`] snapshots. The root itself is the first entry. Siblings are
//! visited in file-name order so repeated runs see the same sequence.
//!
//! By default nothing is filtered: hidden entries are visited and ignore
//! files are not read. [`WalkOptions`] turns those filters on.

use std::path::Path;

use ignore::{DirEntry, WalkBuilder};
use serde::{Deserialize, Serialize};

use super::metadata::FileEntry;
use crate::error::SearchError;

/// Traversal settings, from the `[walk]` configuration section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkOptions {
    pub follow_symlinks: bool,
    pub max_depth: Option<usize>,
    /// Honor `.gitignore`, `.ignore` and git exclude files
    pub gitignore: bool,
    /// Visit hidden files and directories
    pub hidden: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: None,
            gitignore: false,
            hidden: true,
        }
    }
}

/// Build a walker for one root
pub fn build_walker(root: &Path, options: &WalkOptions) -> WalkBuilder {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(!options.hidden)
        .ignore(options.gitignore)
        .git_ignore(options.gitignore)
        .git_exclude(options.gitignore)
        .git_global(options.gitignore)
        .parents(options.gitignore)
        .require_git(false)
        .follow_links(options.follow_symlinks)
        .max_depth(options.max_depth)
        .sort_by_file_name(|a, b| a.cmp(b));
    builder
}

/// Walk one root, yielding an entry snapshot or a traversal error per item
pub fn walk(
    root: &Path,
    options: &WalkOptions,
) -> impl Iterator<Item = Result<FileEntry, SearchError>> + use<> {
    build_walker(root, options).build().map(to_entry)
}

fn to_entry(item: Result<DirEntry, ignore::Error>) -> Result<FileEntry, SearchError> {
    let entry = item?;
    let metadata = entry.metadata()?;
    let path = entry.into_path();

    match FileEntry::from_metadata(path.clone(), &metadata) {
        Ok(file_entry) => Ok(file_entry),
        Err(source) => Err(SearchError::TraversalIo { path, source }),
    }
}
