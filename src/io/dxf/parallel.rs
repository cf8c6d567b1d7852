//! Parallel record decoding
//!
//! Splitting a section into per-record tag runs is sequential; decoding the
//! runs is independent per record and is spread over the rayon pool. Results
//! keep stream order.

use crate::chain::Chain;
use crate::error::Result;
use crate::io::dxf::reader::{decode, is_structure_keyword, DxfStreamReader, TagBuffer};
use crate::io::dxf::{Location, Tag, TagEvent};
use crate::notification::{NotificationCollection, NotificationType};
use crate::record::EntityRecord;
use crate::schema::{schema_for, RecordSchema};
use crate::types::DxfVersion;
use rayon::prelude::*;

/// Below this many records decoding stays on the calling thread
const PARALLEL_DECODE_THRESHOLD: usize = 64;

const CONTEXT: &str = "read records";

/// The tags of one record, split from a stream but not yet decoded
#[derive(Debug, Clone)]
pub struct RecordTags {
    /// Schema selected by the record keyword
    pub schema: &'static RecordSchema,
    /// Location of the `0` tag that started the record
    pub location: Location,
    /// Body tags with their line numbers, `0` tag excluded
    pub tags: Vec<(usize, Tag)>,
}

/// Split the records at the current position into tag runs.
///
/// Stops where [`RecordReader`](crate::io::dxf::RecordReader) would: at the
/// end of the stream or before a structural keyword. Record types without
/// a schema are skipped with a `NotImplemented` notification.
pub fn split_records<S: DxfStreamReader + ?Sized>(
    source: &mut S,
    notes: &mut NotificationCollection,
) -> Result<Vec<RecordTags>> {
    let mut records = Vec::new();
    let mut current: Option<RecordTags> = None;
    let mut skipping = false;
    loop {
        let event = source.next_tag()?;
        let location = source.location();
        match event {
            TagEvent::Tag(tag) => match current.as_mut() {
                Some(record) => record.tags.push((location.line, tag)),
                None if skipping => {}
                None => notes.report(
                    NotificationType::UnknownTag,
                    &location,
                    CONTEXT,
                    format!("group code {} outside of a record; value '{}' discarded", tag.code, tag.value),
                ),
            },
            TagEvent::EndOfEntity(tag) => {
                records.extend(current.take());
                let keyword = tag.value.trim();
                if is_structure_keyword(keyword) {
                    source.push_back(tag);
                    break;
                }
                match schema_for(keyword) {
                    Some(schema) => {
                        skipping = false;
                        current = Some(RecordTags {
                            schema,
                            location,
                            tags: Vec::new(),
                        });
                    }
                    None => {
                        skipping = true;
                        let message = format!("{} records are not supported; skipped", keyword);
                        notes.report(NotificationType::NotImplemented, &location, CONTEXT, message);
                    }
                }
            }
            TagEvent::EndOfStream => {
                records.extend(current.take());
                break;
            }
        }
    }
    Ok(records)
}

fn decode_one(record: RecordTags, version: DxfVersion) -> (Result<EntityRecord>, NotificationCollection) {
    let mut notes = NotificationCollection::new();
    let mut buffer =
        TagBuffer::new(record.location.source.clone(), record.tags).starting_at(record.location.line);
    let result = decode(record.schema, &mut buffer, version, &mut notes);
    (result, notes)
}

/// Decode split records on the rayon pool.
///
/// Results and notifications are in stream order.
pub fn decode_par(records: Vec<RecordTags>, version: DxfVersion) -> (Vec<Result<EntityRecord>>, NotificationCollection) {
    let decoded: Vec<_> = if records.len() > PARALLEL_DECODE_THRESHOLD {
        records
            .into_par_iter()
            .map(|record| decode_one(record, version))
            .collect()
    } else {
        records
            .into_iter()
            .map(|record| decode_one(record, version))
            .collect()
    };

    let mut notes = NotificationCollection::new();
    let results = decoded
        .into_iter()
        .map(|(result, mut record_notes)| {
            notes.append(&mut record_notes);
            result
        })
        .collect();
    (results, notes)
}

/// Parallel counterpart of [`read_chain`](crate::io::dxf::read_chain)
pub fn read_chain_par<S: DxfStreamReader + ?Sized>(
    source: &mut S,
    version: DxfVersion,
    notes: &mut NotificationCollection,
) -> Result<Chain<EntityRecord>> {
    let records = split_records(source, notes)?;
    let count = records.len();
    let (results, mut decode_notes) = decode_par(records, version);
    notes.append(&mut decode_notes);

    let mut chain = Chain::new();
    for result in results {
        match result {
            Ok(record) => {
                chain.append(record);
            }
            Err(e) if !e.is_fatal() => {
                let location = e.location().cloned().unwrap_or_else(|| source.location());
                notes.report(NotificationType::InvalidRecord, &location, CONTEXT, e.to_string());
            }
            Err(e) => return Err(e),
        }
    }
    tracing::debug!(records = count, decoded = chain.len(), "chain decoded in parallel");
    Ok(chain)
}
