//! DXF text stream reader

mod record_decoder;
mod section_reader;
mod stream_reader;
mod text_reader;

pub use record_decoder::decode;
pub use section_reader::{is_structure_keyword, read_chain, read_table, RecordReader, STRUCTURE_KEYWORDS};
pub use stream_reader::{DxfStreamReader, TagBuffer};
pub use text_reader::DxfTextReader;

use crate::chain::Chain;
use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::encoding_from_code_page;
use crate::io::dxf::{Location, Tag, TagEvent};
use crate::notification::{NotificationCollection, NotificationType};
use crate::record::EntityRecord;
use crate::table::Table;
use crate::types::DxfVersion;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// First bytes of a binary DXF file
const BINARY_SENTINEL: &[u8] = b"AutoCAD Binary DXF";

/// Configuration for the DXF reader.
#[derive(Debug, Clone)]
pub struct DxfReaderConfiguration {
    /// Name used in diagnostics, usually the file path
    pub source_name: String,
    /// `$DWGCODEPAGE` name for lines that are not UTF-8. When `None`, the
    /// code page declared in the header is used, else Latin-1.
    pub code_page: Option<String>,
}

impl Default for DxfReaderConfiguration {
    fn default() -> Self {
        Self {
            source_name: "<stream>".to_string(),
            code_page: None,
        }
    }
}

/// DXF file reader
///
/// Wraps a [`DxfTextReader`] with section navigation. Records are decoded
/// against [`DxfReader::version`], which [`DxfReader::read_header`] takes
/// from `$ACADVER`.
pub struct DxfReader<R: Read> {
    reader: DxfTextReader<R>,
    version: DxfVersion,
    config: DxfReaderConfiguration,
    notifications: NotificationCollection,
}

impl DxfReader<File> {
    /// Open a DXF file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let name = path.as_ref().display().to_string();
        let file = File::open(path.as_ref()).map_err(|source| DxfError::Io {
            location: Location::new(name.as_str(), 0),
            source,
        })?;
        let config = DxfReaderConfiguration {
            source_name: name,
            ..Default::default()
        };
        Self::from_reader(file, config)
    }
}

impl<R: Read> DxfReader<R> {
    /// Create a reader over any stream.
    ///
    /// Fails with [`DxfError::UnsupportedFormat`] on binary DXF.
    pub fn from_reader(reader: R, config: DxfReaderConfiguration) -> Result<Self> {
        let mut buffered = BufReader::new(reader);
        let is_binary = buffered
            .fill_buf()
            .map(|head| head.starts_with(BINARY_SENTINEL))
            .map_err(|source| DxfError::Io {
                location: Location::new(config.source_name.as_str(), 0),
                source,
            })?;
        if is_binary {
            return Err(DxfError::UnsupportedFormat(format!(
                "{} is a binary DXF file",
                config.source_name
            )));
        }

        let mut reader = DxfTextReader::from_buf_reader(buffered, config.source_name.as_str());
        if let Some(encoding) = config.code_page.as_deref().and_then(encoding_from_code_page) {
            reader.set_encoding(encoding);
        }

        Ok(Self {
            reader,
            version: DxfVersion::LATEST,
            config,
            notifications: NotificationCollection::new(),
        })
    }

    /// Decode against a given version instead of the one in the header
    pub fn with_version(mut self, version: DxfVersion) -> Self {
        self.version = version;
        self
    }

    /// Version records are decoded against
    pub fn version(&self) -> DxfVersion {
        self.version
    }

    /// The reader configuration
    pub fn configuration(&self) -> &DxfReaderConfiguration {
        &self.config
    }

    /// Diagnostics collected so far
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Take the collected diagnostics, leaving an empty collection
    pub fn take_notifications(&mut self) -> NotificationCollection {
        std::mem::take(&mut self.notifications)
    }

    /// The underlying tag stream
    pub fn stream(&mut self) -> &mut DxfTextReader<R> {
        &mut self.reader
    }

    /// Read the HEADER section if the stream starts with one.
    ///
    /// Picks up `$ACADVER` as the decode version and, for files older than
    /// release 2007, `$DWGCODEPAGE` as the fallback encoding (unless one was
    /// configured). Any other first section is left unread.
    pub fn read_header(&mut self) -> Result<DxfVersion> {
        let section = loop {
            match self.reader.next_tag()? {
                TagEvent::Tag(tag) if tag.code == 999 => {
                    let location = self.reader.location();
                    self.notifications
                        .report(NotificationType::Comment, &location, "read header", tag.value);
                }
                TagEvent::EndOfEntity(tag) if tag.is_keyword("SECTION") => break tag,
                TagEvent::Tag(tag) | TagEvent::EndOfEntity(tag) => {
                    self.reader.push_back(tag);
                    return Ok(self.version);
                }
                TagEvent::EndOfStream => return Ok(self.version),
            }
        };
        match self.reader.next_tag()? {
            TagEvent::Tag(name) if name.code == 2 && name.value.trim() == "HEADER" => {}
            TagEvent::Tag(name) | TagEvent::EndOfEntity(name) => {
                self.reader.push_back(name);
                self.reader.push_back(section);
                return Ok(self.version);
            }
            TagEvent::EndOfStream => return Ok(self.version),
        }

        let mut code_page = None;
        let mut variable: Option<String> = None;
        loop {
            match self.reader.next_tag()? {
                TagEvent::Tag(tag) if tag.code == 9 => variable = Some(tag.value.trim().to_string()),
                TagEvent::Tag(tag) => match variable.as_deref() {
                    Some("$ACADVER") if tag.code == 1 => {
                        match DxfVersion::from_version_string(&tag.value) {
                            Some(version) => self.version = version,
                            None => {
                                let location = self.reader.location();
                                self.notifications.report(
                                    NotificationType::NotSupported,
                                    &location,
                                    "read header",
                                    format!("unknown version '{}'", tag.value.trim()),
                                );
                            }
                        }
                    }
                    Some("$DWGCODEPAGE") if tag.code == 3 => {
                        code_page = Some(tag.value.trim().to_string());
                    }
                    _ => {}
                },
                TagEvent::EndOfEntity(tag) if tag.is_keyword("ENDSEC") => break,
                TagEvent::EndOfEntity(tag) => {
                    self.reader.push_back(tag);
                    break;
                }
                TagEvent::EndOfStream => break,
            }
        }

        if self.version < DxfVersion::AC1021 && self.config.code_page.is_none() {
            if let Some(encoding) = code_page.as_deref().and_then(encoding_from_code_page) {
                self.reader.set_encoding(encoding);
            }
        }
        tracing::debug!(version = %self.version, code_page = ?code_page, "header read");
        Ok(self.version)
    }

    /// Advance to the start of the named section, skipping others.
    ///
    /// Returns `false` when the stream ends first.
    pub fn enter_section(&mut self, name: &str) -> Result<bool> {
        loop {
            match self.reader.next_tag()? {
                TagEvent::EndOfStream => return Ok(false),
                TagEvent::EndOfEntity(tag) if tag.is_keyword("SECTION") => {
                    match self.reader.next_tag()? {
                        TagEvent::Tag(found) if found.code == 2 && found.value.trim() == name => {
                            return Ok(true)
                        }
                        TagEvent::Tag(_) => {}
                        TagEvent::EndOfEntity(tag) => self.reader.push_back(tag),
                        TagEvent::EndOfStream => return Ok(false),
                    }
                }
                _ => {}
            }
        }
    }

    /// Skip to the end of the current section, consuming `0 ENDSEC`
    pub fn leave_section(&mut self) -> Result<()> {
        loop {
            match self.reader.next_tag()? {
                TagEvent::EndOfEntity(tag) if tag.is_keyword("ENDSEC") => return Ok(()),
                TagEvent::EndOfStream => return Ok(()),
                _ => {}
            }
        }
    }

    /// Read the next table of the TABLES section, `None` at its end
    pub fn next_table(&mut self) -> Result<Option<Table>> {
        match self.reader.peek()? {
            TagEvent::EndOfEntity(tag) if tag.is_keyword("TABLE") => {
                read_table(&mut self.reader, self.version, &mut self.notifications).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Lazy sequence of the records at the current position
    pub fn records(&mut self) -> RecordReader<'_, DxfTextReader<R>> {
        RecordReader::new(&mut self.reader, self.version, &mut self.notifications)
    }

    /// Decode the records at the current position into a chain
    pub fn read_chain(&mut self) -> Result<Chain<EntityRecord>> {
        read_chain(&mut self.reader, self.version, &mut self.notifications)
    }

    /// Decode the records at the current position with a worker pool
    pub fn read_chain_par(&mut self) -> Result<Chain<EntityRecord>> {
        crate::io::dxf::read_chain_par(&mut self.reader, self.version, &mut self.notifications)
    }

    /// Pull the next raw tag
    pub fn next_tag(&mut self) -> Result<Option<Tag>> {
        Ok(match self.reader.next_tag()? {
            TagEvent::Tag(tag) | TagEvent::EndOfEntity(tag) => Some(tag),
            TagEvent::EndOfStream => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAWING: &str = "999\nwritten by hand\n0\nSECTION\n2\nHEADER\n9\n$ACADVER\n1\nAC1015\n9\n$DWGCODEPAGE\n3\nANSI_1251\n0\nENDSEC\n0\nSECTION\n2\nTABLES\n0\nTABLE\n2\nLAYER\n70\n1\n0\nLAYER\n2\n0\n62\n7\n0\nENDTAB\n0\nENDSEC\n0\nSECTION\n2\nENTITIES\n0\nLINE\n8\n0\n0\nENDSEC\n0\nEOF\n";

    #[test]
    fn test_header_sets_version() {
        let mut reader =
            DxfReader::from_reader(DRAWING.as_bytes(), DxfReaderConfiguration::default()).unwrap();
        assert_eq!(reader.read_header().unwrap(), DxfVersion::AC1015);
        assert!(reader.notifications().has_type(NotificationType::Comment));
    }

    #[test]
    fn test_sections_and_tables() {
        let mut reader =
            DxfReader::from_reader(DRAWING.as_bytes(), DxfReaderConfiguration::default()).unwrap();
        reader.read_header().unwrap();
        assert!(reader.enter_section("TABLES").unwrap());
        let layers = reader.next_table().unwrap().unwrap();
        assert_eq!(layers.name(), "LAYER");
        assert_eq!(layers.len(), 1);
        assert!(reader.next_table().unwrap().is_none());
        reader.leave_section().unwrap();

        assert!(reader.enter_section("ENTITIES").unwrap());
        let entities = reader.read_chain().unwrap();
        assert_eq!(entities.len(), 1);
        reader.leave_section().unwrap();
        assert!(!reader.enter_section("OBJECTS").unwrap());
    }

    #[test]
    fn test_binary_dxf_is_rejected() {
        let data = b"AutoCAD Binary DXF\r\n\x1a\x00rest";
        let result = DxfReader::from_reader(&data[..], DxfReaderConfiguration::default());
        assert!(matches!(result, Err(DxfError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_header_is_optional() {
        let data = "0\nSECTION\n2\nENTITIES\n0\nPOINT\n0\nENDSEC\n0\nEOF\n";
        let mut reader = DxfReader::from_reader(data.as_bytes(), DxfReaderConfiguration::default())
            .unwrap()
            .with_version(DxfVersion::AC1009);
        assert_eq!(reader.read_header().unwrap(), DxfVersion::AC1009);
        assert!(reader.enter_section("ENTITIES").unwrap());
        assert_eq!(reader.records().count(), 1);
    }
}
