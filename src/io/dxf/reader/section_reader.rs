//! Lazy record sequences and table framing

use super::record_decoder::decode;
use super::stream_reader::DxfStreamReader;
use crate::chain::Chain;
use crate::error::{DxfError, Result};
use crate::io::dxf::{Location, TagEvent};
use crate::notification::{NotificationCollection, NotificationType};
use crate::record::EntityRecord;
use crate::schema::{schema_for, TABLE};
use crate::table::Table;
use crate::types::DxfVersion;

/// Keywords that frame records instead of being records
pub const STRUCTURE_KEYWORDS: &[&str] = &["ENDTAB", "ENDSEC", "ENDBLK", "TABLE", "SECTION", "BLOCK"];

/// Whether a `0` keyword frames records
pub fn is_structure_keyword(keyword: &str) -> bool {
    STRUCTURE_KEYWORDS.contains(&keyword.trim())
}

/// Lazy sequence of decoded records
///
/// Each `next` call decodes exactly one record. The sequence ends at the
/// end of the stream, at a structural keyword (left unconsumed for the
/// caller) or after a fatal error. Record types without a schema are
/// skipped with a `NotImplemented` notification. Dropping the reader
/// before it ends leaves the stream positioned after the last record read.
pub struct RecordReader<'a, S: DxfStreamReader + ?Sized> {
    source: &'a mut S,
    version: DxfVersion,
    notes: &'a mut NotificationCollection,
    done: bool,
}

impl<'a, S: DxfStreamReader + ?Sized> RecordReader<'a, S> {
    /// Create a reader over `source`, decoding against `version`
    pub fn new(source: &'a mut S, version: DxfVersion, notes: &'a mut NotificationCollection) -> Self {
        Self {
            source,
            version,
            notes,
            done: false,
        }
    }

    fn report(&mut self, notification_type: NotificationType, location: &Location, message: String) {
        self.notes
            .report(notification_type, location, "read records", message);
    }

    fn skip_record(&mut self) -> Result<()> {
        loop {
            match self.source.next_tag()? {
                TagEvent::Tag(_) => continue,
                TagEvent::EndOfEntity(tag) => {
                    self.source.push_back(tag);
                    return Ok(());
                }
                TagEvent::EndOfStream => return Ok(()),
            }
        }
    }

    fn next_record(&mut self) -> Option<Result<EntityRecord>> {
        loop {
            let event = match self.source.next_tag() {
                Ok(event) => event,
                Err(e) => return Some(Err(e)),
            };
            let tag = match event {
                TagEvent::EndOfStream => return None,
                TagEvent::Tag(tag) => {
                    let location = self.source.location();
                    self.report(
                        NotificationType::UnknownTag,
                        &location,
                        format!("group code {} outside of a record; value '{}' discarded", tag.code, tag.value),
                    );
                    continue;
                }
                TagEvent::EndOfEntity(tag) => tag,
            };

            let keyword = tag.value.trim();
            if is_structure_keyword(keyword) {
                self.source.push_back(tag);
                return None;
            }
            match schema_for(keyword) {
                Some(schema) => {
                    return Some(decode(schema, &mut *self.source, self.version, &mut *self.notes))
                }
                None => {
                    let location = self.source.location();
                    let message = format!("{} records are not supported; skipped", keyword);
                    self.report(NotificationType::NotImplemented, &location, message);
                    if let Err(e) = self.skip_record() {
                        return Some(Err(e));
                    }
                }
            }
        }
    }
}

impl<S: DxfStreamReader + ?Sized> Iterator for RecordReader<'_, S> {
    type Item = Result<EntityRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let next = self.next_record();
        match &next {
            None => self.done = true,
            Some(Err(e)) if e.is_fatal() => self.done = true,
            _ => {}
        }
        next
    }
}

/// Decode records into a chain until the sequence ends.
///
/// Rejected records are reported as `InvalidRecord` and left out; fatal
/// errors are returned.
pub fn read_chain<S: DxfStreamReader + ?Sized>(
    source: &mut S,
    version: DxfVersion,
    notes: &mut NotificationCollection,
) -> Result<Chain<EntityRecord>> {
    let mut chain = Chain::new();
    let mut reader = RecordReader::new(source, version, notes);
    while let Some(result) = reader.next() {
        match result {
            Ok(record) => {
                chain.append(record);
            }
            Err(e) if !e.is_fatal() => {
                let location = e.location().cloned().unwrap_or_else(|| reader.source.location());
                reader.report(NotificationType::InvalidRecord, &location, e.to_string());
            }
            Err(e) => return Err(e),
        }
    }
    tracing::debug!(records = chain.len(), "chain decoded");
    Ok(chain)
}

/// Read one symbol table: `0 TABLE`, its header fields, the entries, `0 ENDTAB`
pub fn read_table<S: DxfStreamReader + ?Sized>(
    source: &mut S,
    version: DxfVersion,
    notes: &mut NotificationCollection,
) -> Result<Table> {
    match source.next_tag()? {
        TagEvent::EndOfEntity(tag) if tag.is_keyword("TABLE") => {}
        TagEvent::EndOfEntity(tag) | TagEvent::Tag(tag) => {
            return Err(DxfError::MalformedTag {
                location: source.location(),
                text: format!("expected 0/TABLE, found {}/{}", tag.code, tag.value),
            })
        }
        TagEvent::EndOfStream => {
            return Err(DxfError::MalformedTag {
                location: source.location(),
                text: "expected 0/TABLE, found end of stream".to_string(),
            })
        }
    }

    let header = decode(&TABLE, source, version, notes)?;
    let entries = read_chain(source, version, notes)?;
    let table = Table { header, entries };

    match source.next_tag()? {
        TagEvent::EndOfEntity(tag) if tag.is_keyword("ENDTAB") => {}
        TagEvent::EndOfEntity(tag) => {
            let location = source.location();
            source.push_back(tag);
            notes.report(
                NotificationType::Warning,
                &location,
                "read table",
                format!("{} table is not closed by ENDTAB", table.name()),
            );
        }
        _ => notes.report(
            NotificationType::Warning,
            &source.location(),
            "read table",
            format!("{} table is not closed by ENDTAB", table.name()),
        ),
    }
    Ok(table)
}
