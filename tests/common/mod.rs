//! Shared test utilities for dxf_records integration tests.
//!
//! Stream construction, decode/encode helpers and version constants used by
//! every test crate via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use dxf_records::io::dxf::{
    decode, encode_tags, read_chain, DxfStreamWriter, DxfTextReader, DxfTextWriter, LineEnding, Tag,
    TagBuffer,
};
use dxf_records::schema::RecordSchema;
use dxf_records::types::DxfVersion;
use dxf_records::{Chain, EntityRecord, NotificationCollection};

// ===========================================================================
// Version constants
// ===========================================================================

/// Versions exercised by version-sensitive tests, oldest first.
pub const TEST_VERSIONS: [DxfVersion; 6] = [
    DxfVersion::AC1009,
    DxfVersion::AC1012,
    DxfVersion::AC1014,
    DxfVersion::AC1015,
    DxfVersion::AC1021,
    DxfVersion::AC1032,
];

// ===========================================================================
// Tag streams
// ===========================================================================

/// Build an in-memory tag source from `(code, value)` pairs.
pub fn tag_source(tags: &[(i32, &str)]) -> TagBuffer {
    TagBuffer::from_tags("test", tags.iter().map(|(code, value)| Tag::new(*code, *value)))
}

/// Build a text stream reader over DXF text.
pub fn text_source(text: &str) -> DxfTextReader<&[u8]> {
    DxfTextReader::new(text.as_bytes(), "test.dxf")
}

/// Render tags as DXF text with `\n` line endings.
pub fn to_text(tags: &[Tag]) -> String {
    let mut writer = DxfTextWriter::with_line_ending(Vec::new(), LineEnding::Lf);
    for tag in tags {
        writer
            .write_string(tag.code, &tag.value)
            .unwrap_or_else(|e| panic!("in-memory write failed: {e}"));
    }
    String::from_utf8(writer.into_inner()).expect("writer produced UTF-8")
}

// ===========================================================================
// Decode / encode helpers
// ===========================================================================

/// Decode an encoded record (`0 <type>` first) from memory.
pub fn decode_tags(
    schema: &'static RecordSchema,
    tags: &[Tag],
    version: DxfVersion,
) -> (dxf_records::Result<EntityRecord>, NotificationCollection) {
    assert_eq!(tags.first().map(|t| t.code), Some(0), "record must start with a 0 tag");
    let mut source = TagBuffer::from_tags("test", tags[1..].iter().cloned());
    let mut notes = NotificationCollection::new();
    let result = decode(schema, &mut source, version, &mut notes);
    (result, notes)
}

/// Encode a record against its own schema, panicking on failure.
pub fn encode_record(record: &EntityRecord, version: DxfVersion) -> Vec<Tag> {
    encode_tags(record.schema(), record, version)
        .unwrap_or_else(|e| panic!("encoding {} at {version} failed: {e}", record.type_name()))
}

/// Encode a record, then decode the result at the same version.
pub fn roundtrip(record: &EntityRecord, version: DxfVersion) -> (EntityRecord, NotificationCollection) {
    let tags = encode_record(record, version);
    let (result, notes) = decode_tags(record.schema(), &tags, version);
    let decoded =
        result.unwrap_or_else(|e| panic!("decoding {} at {version} failed: {e}", record.type_name()));
    (decoded, notes)
}

/// Decode every record of a DXF text fragment into a chain.
pub fn read_text_chain(text: &str, version: DxfVersion) -> (Chain<EntityRecord>, NotificationCollection) {
    let mut source = text_source(text);
    let mut notes = NotificationCollection::new();
    let chain = read_chain(&mut source, version, &mut notes)
        .unwrap_or_else(|e| panic!("reading chain failed: {e}"));
    (chain, notes)
}
