//! Section, table and chain framing

use super::record_encoder::encode_tags;
use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
use super::DxfWriterConfiguration;
use crate::chain::Chain;
use crate::error::Result;
use crate::io::dxf::Tag;
use crate::notification::{Notification, NotificationCollection, NotificationType};
use crate::record::EntityRecord;
use crate::table::Table;

/// Writes records and their framing to a tag sink
pub struct SectionWriter<'a, W: DxfStreamWriter + ?Sized> {
    writer: &'a mut W,
    config: &'a DxfWriterConfiguration,
    notes: &'a mut NotificationCollection,
}

impl<'a, W: DxfStreamWriter + ?Sized> SectionWriter<'a, W> {
    /// Create a new section writer
    pub fn new(
        writer: &'a mut W,
        config: &'a DxfWriterConfiguration,
        notes: &'a mut NotificationCollection,
    ) -> Self {
        Self { writer, config, notes }
    }

    /// Write the HEADER section. Only `$ACADVER` is written.
    pub fn write_header(&mut self) -> Result<()> {
        let version = self.config.version;
        self.writer.begin_section("HEADER")?;
        self.write_header_variable("$ACADVER", 1, version.as_str())?;
        self.writer.end_section()
    }

    fn write_header_variable(&mut self, name: &str, code: i32, value: &str) -> Result<()> {
        self.writer.write_string(9, name)?;
        self.writer.write_string(code, value)
    }

    /// Encode and write one record.
    ///
    /// Returns `Ok(false)` when the record was left out: its type does not
    /// exist in the target version, or it cannot be encoded and the writer
    /// is failsafe.
    pub fn write_record(&mut self, record: &EntityRecord) -> Result<bool> {
        match self.encode_record(record)? {
            Some(tags) => {
                self.writer.write_tags(&tags)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Encode one record, or report why it is left out
    fn encode_record(&mut self, record: &EntityRecord) -> Result<Option<Vec<Tag>>> {
        let version = self.config.version;
        let schema = record.schema();
        if schema.since > version {
            self.report(
                NotificationType::NotSupported,
                record,
                format!("{} records do not exist in {}; skipped", schema.type_name, version),
            );
            return Ok(None);
        }
        match encode_tags(schema, record, version) {
            Ok(tags) => Ok(Some(tags)),
            Err(e) if self.config.failsafe && !e.is_fatal() => {
                self.report(NotificationType::MissingRequiredField, record, e.to_string());
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Write every record of a chain in order; returns the number written
    pub fn write_chain(&mut self, chain: &Chain<EntityRecord>) -> Result<usize> {
        let mut written = 0;
        for record in chain {
            if self.write_record(record)? {
                written += 1;
            }
        }
        tracing::debug!(written, skipped = chain.len() - written, "chain written");
        Ok(written)
    }

    /// Write `0 TABLE`, the header, the entries and `0 ENDTAB`.
    ///
    /// Entries are encoded before the header so its count (70) only covers
    /// the entries actually written.
    pub fn write_table(&mut self, table: &Table) -> Result<usize> {
        let mut entries = Vec::with_capacity(table.len());
        for entry in table.iter() {
            if let Some(tags) = self.encode_record(entry)? {
                entries.push(tags);
            }
        }
        let written = entries.len();

        let mut header = table.header.clone();
        header.set(70, i16::try_from(written).unwrap_or(i16::MAX))?;
        let tags = encode_tags(header.schema(), &header, self.config.version)?;
        // encode_tags starts with `0 TABLE`
        self.writer.write_tags(&tags)?;
        for tags in &entries {
            self.writer.write_tags(tags)?;
        }
        self.writer.write_keyword("ENDTAB")?;
        tracing::debug!(table = table.name(), written, skipped = table.len() - written, "table written");
        Ok(written)
    }

    fn report(&mut self, notification_type: NotificationType, record: &EntityRecord, message: String) {
        let context = match &record.handle {
            Some(handle) => format!("write {} {}", record.type_name(), handle),
            None => format!("write {}", record.type_name()),
        };
        self.notes
            .push(Notification::new(notification_type, message).in_context(context));
    }
}
