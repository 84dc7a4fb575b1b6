//! Line-by-line content scanning
//!
//! The whole stream is always read: every satisfying line is emitted even
//! after the file is known to match. Lines are split on `\n` with a trailing
//! `\r` removed, and matched as raw bytes so invalid UTF-8 never stops a scan.

use std::io::{self, BufRead};

use super::patterns::ContentPredicate;

/// Result of scanning one stream
#[derive(Debug, Default)]
pub struct ContentScan {
    pub lines_read: usize,
    pub lines_matched: usize,
    /// Set when reading stopped early; lines before the failure were scanned
    pub read_error: Option<io::Error>,
}

impl ContentScan {
    pub fn matched(&self) -> bool {
        self.lines_matched > 0
    }
}

impl ContentPredicate {
    /// Scan `reader`, handing every satisfying line to `emit` as it is found.
    ///
    /// Read failures are recorded in the returned [`ContentScan`]. An error
    /// from `emit` aborts the scan and is returned as is.
    pub fn scan<R, F>(&self, mut reader: R, mut emit: F) -> io::Result<ContentScan>
    where
        R: BufRead,
        F: FnMut(&[u8]) -> io::Result<()>,
    {
        let mut scan = ContentScan::default();
        let mut buffer = Vec::with_capacity(256);

        loop {
            buffer.clear();
            match reader.read_until(b'\n', &mut buffer) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    scan.read_error = Some(e);
                    break;
                }
            }

            scan.lines_read += 1;
            let line = strip_line_terminator(&buffer);
            if self.line_matches(line) {
                emit(line)?;
                scan.lines_matched += 1;
            }
        }

        Ok(scan)
    }
}

fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
