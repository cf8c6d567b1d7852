//! Text tag stream writer

use super::stream_writer::DxfStreamWriter;
use super::LineEnding;
use crate::error::{DxfError, Result};
use crate::io::dxf::Location;
use std::io::Write;
use std::sync::Arc;

/// Writes tags as alternating group-code and value lines
///
/// Group codes are right-aligned in a three character field; values are
/// written verbatim.
pub struct DxfTextWriter<W: Write> {
    writer: W,
    line_ending: LineEnding,
    target: Arc<str>,
    /// Lines written so far
    line_number: usize,
}

impl<W: Write> DxfTextWriter<W> {
    /// Create a writer using `\n` line endings
    pub fn new(writer: W) -> Self {
        Self::with_line_ending(writer, LineEnding::Lf)
    }

    /// Create a writer with the given line ending
    pub fn with_line_ending(writer: W, line_ending: LineEnding) -> Self {
        Self {
            writer,
            line_ending,
            target: Arc::from("<output>"),
            line_number: 0,
        }
    }

    /// Name the output in diagnostics
    pub fn named(mut self, target: impl Into<Arc<str>>) -> Self {
        self.target = target.into();
        self
    }

    /// Number of lines written
    pub fn lines_written(&self) -> usize {
        self.line_number
    }

    /// Get the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn io_error(&self, source: std::io::Error) -> DxfError {
        DxfError::Io {
            location: Location::new(self.target.clone(), self.line_number),
            source,
        }
    }
}

impl<W: Write> DxfStreamWriter for DxfTextWriter<W> {
    fn write_string(&mut self, code: i32, value: &str) -> Result<()> {
        let ending = self.line_ending.as_str();
        let result = write!(self.writer, "{:>3}{}{}{}", code, ending, value, ending);
        self.line_number += 2;
        result.map_err(|e| self.io_error(e))
    }

    fn flush(&mut self) -> Result<()> {
        let result = self.writer.flush();
        result.map_err(|e| self.io_error(e))
    }
}
