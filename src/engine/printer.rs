use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use super::types::OutputFormat;

/// Writes search results to stdout (or any writer) in the chosen format.
///
/// Text output writes pathnames and lines as raw bytes, so two runs over the
/// same tree produce byte-identical output. JSON output is lossy for
/// non-UTF-8 data.
pub struct Printer<W: Write> {
    writer: W,
    format: OutputFormat,
}

#[derive(Serialize)]
struct Record<'a> {
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<&'a str>,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print a pathname on its own line
    pub fn pathname(&mut self, path: &Path) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.writer.write_all(path.as_os_str().as_encoded_bytes())?;
                self.writer.write_all(b"\n")
            }
            OutputFormat::Json => self.json(&Record {
                path: &path.to_string_lossy(),
                line: None,
            }),
        }
    }

    /// Print a matching line as `path:line`
    pub fn line(&mut self, path: &Path, line: &[u8]) -> io::Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.writer.write_all(path.as_os_str().as_encoded_bytes())?;
                self.writer.write_all(b":")?;
                self.writer.write_all(line)?;
                self.writer.write_all(b"\n")
            }
            OutputFormat::Json => self.json(&Record {
                path: &path.to_string_lossy(),
                line: Some(&String::from_utf8_lossy(line)),
            }),
        }
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn json(&mut self, record: &Record<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")
    }
}
