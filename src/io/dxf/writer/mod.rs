//! DXF writer module

mod record_encoder;
mod section_writer;
mod stream_writer;
mod text_writer;

pub use record_encoder::{encode, encode_tags};
pub use section_writer::SectionWriter;
pub use stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
pub use text_writer::DxfTextWriter;

use crate::chain::Chain;
use crate::error::{DxfError, Result};
use crate::io::dxf::Location;
use crate::notification::NotificationCollection;
use crate::record::EntityRecord;
use crate::table::Table;
use crate::types::DxfVersion;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Line terminator written after every line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// The terminator text
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// Configuration for the DXF writer.
#[derive(Debug, Clone)]
pub struct DxfWriterConfiguration {
    /// Version to encode for; newer fields and record types are left out
    pub version: DxfVersion,
    /// Line terminator
    pub line_ending: LineEnding,
    /// Skip records that cannot be encoded (with a notification) instead
    /// of failing the whole write
    pub failsafe: bool,
}

impl Default for DxfWriterConfiguration {
    fn default() -> Self {
        Self {
            version: DxfVersion::LATEST,
            line_ending: LineEnding::Lf,
            failsafe: true,
        }
    }
}

/// DXF text file writer
///
/// Sections are written in the order the caller asks for them; call
/// [`DxfWriter::finish`] to write `0 EOF`.
pub struct DxfWriter<W: Write> {
    writer: DxfTextWriter<W>,
    config: DxfWriterConfiguration,
    notifications: NotificationCollection,
}

impl DxfWriter<BufWriter<File>> {
    /// Create a file and write to it
    pub fn create<P: AsRef<Path>>(path: P, config: DxfWriterConfiguration) -> Result<Self> {
        let name = path.as_ref().display().to_string();
        let file = File::create(path.as_ref()).map_err(|source| DxfError::Io {
            location: Location::new(name.as_str(), 0),
            source,
        })?;
        let mut writer = Self::new(BufWriter::new(file), config);
        writer.writer = writer.writer.named(name);
        Ok(writer)
    }
}

impl<W: Write> DxfWriter<W> {
    /// Create a writer over any output
    pub fn new(writer: W, config: DxfWriterConfiguration) -> Self {
        Self {
            writer: DxfTextWriter::with_line_ending(writer, config.line_ending),
            config,
            notifications: NotificationCollection::new(),
        }
    }

    /// The writer configuration
    pub fn configuration(&self) -> &DxfWriterConfiguration {
        &self.config
    }

    /// Diagnostics collected so far
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// The underlying tag sink
    pub fn stream(&mut self) -> &mut DxfTextWriter<W> {
        &mut self.writer
    }

    fn sections(&mut self) -> SectionWriter<'_, DxfTextWriter<W>> {
        SectionWriter::new(&mut self.writer, &self.config, &mut self.notifications)
    }

    /// Write the HEADER section
    pub fn write_header(&mut self) -> Result<()> {
        self.sections().write_header()
    }

    /// Write `0 SECTION` and `2 <name>`
    pub fn begin_section(&mut self, name: &str) -> Result<()> {
        self.writer.begin_section(name)
    }

    /// Write `0 ENDSEC`
    pub fn end_section(&mut self) -> Result<()> {
        self.writer.end_section()
    }

    /// Encode and write one record; `false` if it was skipped
    pub fn write_record(&mut self, record: &EntityRecord) -> Result<bool> {
        self.sections().write_record(record)
    }

    /// Write a chain of records; returns the number written
    pub fn write_chain(&mut self, chain: &Chain<EntityRecord>) -> Result<usize> {
        self.sections().write_chain(chain)
    }

    /// Write a symbol table with its framing
    pub fn write_table(&mut self, table: &Table) -> Result<usize> {
        self.sections().write_table(table)
    }

    /// Write `0 EOF` and flush
    pub fn finish(&mut self) -> Result<()> {
        self.writer.write_keyword("EOF")?;
        self.writer.flush()
    }

    /// Get the inner output
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
