//! Text tag stream reader

use super::stream_reader::{classify, DxfStreamReader};
use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::decode_line;
use crate::io::dxf::{Location, Tag, TagEvent};
use encoding_rs::Encoding;
use std::io::{BufRead, BufReader, Read};
use std::sync::Arc;

/// Reads alternating group-code and value lines
///
/// Group-code lines are trimmed before parsing. Value lines only lose their
/// `\n` or `\r\n` terminator, so padded text values survive unchanged.
pub struct DxfTextReader<R: Read> {
    reader: BufReader<R>,
    source: Arc<str>,
    /// Lines consumed so far
    line_number: usize,
    /// Line of the group code of the last returned tag
    tag_line: usize,
    pushed: Vec<(usize, Tag)>,
    /// Fallback for lines that are not UTF-8. `None` means Latin-1.
    encoding: Option<&'static Encoding>,
    finished: bool,
}

impl<R: Read> DxfTextReader<R> {
    /// Create a reader over a raw stream
    pub fn new(reader: R, source: impl Into<Arc<str>>) -> Self {
        Self::from_buf_reader(BufReader::new(reader), source)
    }

    /// Create a reader over an already buffered stream
    pub fn from_buf_reader(reader: BufReader<R>, source: impl Into<Arc<str>>) -> Self {
        Self {
            reader,
            source: source.into(),
            line_number: 0,
            tag_line: 0,
            pushed: Vec::new(),
            encoding: None,
            finished: false,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn io_error(&self, source: std::io::Error) -> DxfError {
        DxfError::Io {
            location: Location::new(self.source.clone(), self.line_number + 1),
            source,
        }
    }

    fn malformed(&self, line: usize, text: String) -> DxfError {
        DxfError::MalformedTag {
            location: Location::new(self.source.clone(), line),
            text,
        }
    }

    /// Read one line without its terminator, `None` at end of input
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut bytes)
            .map_err(|e| self.io_error(e))?;
        if read == 0 {
            return Ok(None);
        }
        self.line_number += 1;

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }
        Ok(Some(decode_line(&bytes, self.encoding).into_owned()))
    }

    fn at_end(&mut self) -> Result<bool> {
        let empty = self.reader.fill_buf().map(|buffered| buffered.is_empty());
        empty.map_err(|e| self.io_error(e))
    }

    fn read_tag(&mut self) -> Result<Option<Tag>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let code_line_number = self.line_number;

        let code_text = code_line.trim();
        if code_text.is_empty() && self.at_end()? {
            return Ok(None);
        }
        let code = code_text.parse::<i32>().map_err(|_| {
            self.malformed(code_line_number, format!("'{}' is not a group code", code_text))
        })?;

        let value = match self.read_line()? {
            Some(line) => line,
            None => {
                return Err(self.malformed(
                    code_line_number,
                    format!("group code {} has no value line", code),
                ))
            }
        };

        self.tag_line = code_line_number;
        Ok(Some(Tag::new(code, value)))
    }
}

impl<R: Read> DxfStreamReader for DxfTextReader<R> {
    fn next_tag(&mut self) -> Result<TagEvent> {
        if let Some((line, tag)) = self.pushed.pop() {
            self.tag_line = line;
            return Ok(classify(tag));
        }
        if self.finished {
            return Ok(TagEvent::EndOfStream);
        }
        match self.read_tag()? {
            Some(tag) => {
                let event = classify(tag);
                if event == TagEvent::EndOfStream {
                    self.finished = true;
                }
                Ok(event)
            }
            None => {
                self.finished = true;
                Ok(TagEvent::EndOfStream)
            }
        }
    }

    fn push_back(&mut self, tag: Tag) {
        self.pushed.push((self.tag_line, tag));
    }

    fn location(&self) -> Location {
        Location::new(self.source.clone(), self.tag_line)
    }

    fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }
}
