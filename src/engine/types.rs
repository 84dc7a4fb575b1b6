use serde::{Deserialize, Serialize};

/// What the engine did with one visited entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A filter rejected the entry; nothing was printed
    Suppressed,
    /// The pathname was printed on its own line
    PrintedPathname,
    /// Matching lines were printed as `path:line`
    PrintedLines(usize),
}

/// Statistics from a search
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub entries_visited: usize,
    pub pathnames_printed: usize,
    /// Files opened for content matching
    pub files_scanned: usize,
    pub files_matched: usize,
    pub lines_matched: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

impl SearchStats {
    pub(crate) fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Suppressed => {}
            Outcome::PrintedPathname => self.pathnames_printed += 1,
            Outcome::PrintedLines(lines) => {
                self.files_matched += 1;
                self.lines_matched += lines;
            }
        }
    }
}

/// Output format for results on stdout
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `path` and `path:line`, one per line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
