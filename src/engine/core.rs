use std::fs::File;
use std::io::{BufReader, Write};
use std::time::Instant;

use tracing::{debug, trace};

use super::directory;
use super::metadata::{FileEntry, FilterDecision, MetadataFilter};
use super::options::SearchOptions;
use super::printer::Printer;
use super::types::{Outcome, SearchStats};
use crate::error::SearchError;

/// Evaluates every walked entry against the configured filters.
///
/// Per entry, in this order, stopping at the first failure:
/// 1. metadata (type, dates, size)
/// 2. pathname patterns
/// 3. content patterns
///
/// Cheap checks run first so files are opened only when every other filter
/// has passed.
pub struct SearchEngine {
    options: SearchOptions,
    metadata: MetadataFilter,
}

impl SearchEngine {
    pub fn new(options: SearchOptions) -> Self {
        let metadata = MetadataFilter::new(options.metadata.clone());
        Self { options, metadata }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Walk every root in order, printing results as they are found.
    ///
    /// Recoverable errors go to `report` and the walk continues. Only a
    /// failure to write output ends the search early.
    pub fn run<W, R>(&self, printer: &mut Printer<W>, mut report: R) -> Result<SearchStats, SearchError>
    where
        W: Write,
        R: FnMut(&SearchError),
    {
        let start_time = Instant::now();
        let mut stats = SearchStats::default();
        let mut errors = 0;
        let mut on_error = |error: &SearchError| {
            errors += 1;
            report(error);
        };

        for root in &self.options.roots {
            debug!("Walking {}", root.display());

            for item in directory::walk(root, &self.options.walk) {
                let entry = match item {
                    Ok(entry) => entry,
                    Err(e) => {
                        debug!("Skipping unreadable entry: {}", e);
                        on_error(&e);
                        continue;
                    }
                };

                stats.entries_visited += 1;
                let outcome = self.evaluate_into(&entry, printer, &mut on_error, &mut stats)?;
                stats.record(outcome);
            }
        }

        printer.flush().map_err(SearchError::Output)?;

        stats.errors = errors;
        stats.duration_ms = start_time.elapsed().as_millis() as u64;
        debug!(
            "Search finished: {} entries, {} errors in {}ms",
            stats.entries_visited, stats.errors, stats.duration_ms
        );
        Ok(stats)
    }

    /// Decide what to do with a single entry and print accordingly
    pub fn evaluate<W, R>(
        &self,
        entry: &FileEntry,
        printer: &mut Printer<W>,
        report: &mut R,
    ) -> Result<Outcome, SearchError>
    where
        W: Write,
        R: FnMut(&SearchError),
    {
        self.evaluate_into(entry, printer, report, &mut SearchStats::default())
    }

    /// As [`evaluate`](Self::evaluate), counting opened files in `stats`
    fn evaluate_into<W, R>(
        &self,
        entry: &FileEntry,
        printer: &mut Printer<W>,
        report: &mut R,
        stats: &mut SearchStats,
    ) -> Result<Outcome, SearchError>
    where
        W: Write,
        R: FnMut(&SearchError),
    {
        if let FilterDecision::Skip(reason) = self.metadata.decide(entry) {
            trace!("{}: skipped ({})", entry.path.display(), reason);
            return Ok(Outcome::Suppressed);
        }

        let names = &self.options.names;
        let contents = &self.options.contents;

        if names.is_empty() && contents.is_empty() {
            return self.print_pathname(entry, printer);
        }

        if !names.matches(entry.pathname()) {
            trace!("{}: skipped (name)", entry.path.display());
            return Ok(Outcome::Suppressed);
        }

        if contents.is_empty() {
            return self.print_pathname(entry, printer);
        }

        self.scan_contents(entry, printer, report, stats)
    }

    fn print_pathname<W: Write>(
        &self,
        entry: &FileEntry,
        printer: &mut Printer<W>,
    ) -> Result<Outcome, SearchError> {
        printer.pathname(&entry.path).map_err(SearchError::Output)?;
        Ok(Outcome::PrintedPathname)
    }

    fn scan_contents<W, R>(
        &self,
        entry: &FileEntry,
        printer: &mut Printer<W>,
        report: &mut R,
        stats: &mut SearchStats,
    ) -> Result<Outcome, SearchError>
    where
        W: Write,
        R: FnMut(&SearchError),
    {
        // Directories have no lines to match
        if entry.is_dir {
            trace!("{}: skipped (directory has no contents)", entry.path.display());
            return Ok(Outcome::Suppressed);
        }

        let file = match File::open(&entry.path) {
            Ok(file) => file,
            Err(source) => {
                let error = SearchError::ContentRead {
                    path: entry.path.clone(),
                    source,
                };
                debug!("Cannot open for content matching: {}", error);
                report(&error);
                return Ok(Outcome::Suppressed);
            }
        };

        // A symlink to a directory only shows up once the link is resolved
        if file.metadata().is_ok_and(|metadata| metadata.is_dir()) {
            trace!("{}: skipped (links to a directory)", entry.path.display());
            return Ok(Outcome::Suppressed);
        }

        stats.files_scanned += 1;
        let path = entry.path();
        let scan = self
            .options
            .contents
            .scan(BufReader::new(file), |line| printer.line(path, line))
            .map_err(SearchError::Output)?;

        trace!(
            "{}: {} of {} lines matched",
            path.display(),
            scan.lines_matched,
            scan.lines_read
        );

        if let Some(source) = scan.read_error {
            let error = SearchError::ContentRead {
                path: entry.path.clone(),
                source,
            };
            debug!("Content scan stopped early: {}", error);
            report(&error);
        }

        if scan.lines_matched > 0 {
            Ok(Outcome::PrintedLines(scan.lines_matched))
        } else {
            Ok(Outcome::Suppressed)
        }
    }
}
