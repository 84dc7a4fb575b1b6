//! Diagnostic output for the search CLI
//!
//! Results own stdout, so everything here goes to stderr. Styling uses
//! `console`, which drops colors when stderr is not a terminal.

use console::style;

use crate::engine::SearchStats;

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: u8,
    quiet: bool,
}

impl Output {
    pub fn new(verbose: u8, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("✖").red().for_stderr(), message);
    }

    /// Print a verbose message (only if verbose mode is enabled)
    pub fn verbose(&self, message: &str) {
        if self.verbose > 0 && !self.quiet {
            eprintln!(
                "{} {}",
                style("ℹ").dim().for_stderr(),
                style(message).dim().for_stderr()
            );
        }
    }

    /// Print the post-walk summary
    pub fn stats(&self, stats: &SearchStats) {
        eprintln!("\n{}", style("Search summary").bold().for_stderr());
        self.summary_stat("Entries visited", stats.entries_visited);
        self.summary_stat("Pathnames printed", stats.pathnames_printed);
        self.summary_stat("Files scanned", stats.files_scanned);
        self.summary_stat("Files matched", stats.files_matched);
        self.summary_stat("Lines matched", stats.lines_matched);
        if stats.errors > 0 {
            eprintln!(
                "  {:<18} {}",
                style("Errors").dim().for_stderr(),
                style(stats.errors).red().bold().for_stderr()
            );
        } else {
            self.summary_stat("Errors", 0);
        }
        eprintln!(
            "  {:<18} {}",
            style("Elapsed").dim().for_stderr(),
            style(format!("{}ms", stats.duration_ms)).bold().for_stderr()
        );
    }

    fn summary_stat(&self, label: &str, value: usize) {
        eprintln!(
            "  {:<18} {}",
            style(label).dim().for_stderr(),
            style(value).bold().for_stderr()
        );
    }
}
