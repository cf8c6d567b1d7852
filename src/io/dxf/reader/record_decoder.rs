//! Schema-driven record decoding

use super::stream_reader::DxfStreamReader;
use crate::error::{DxfError, Result};
use crate::io::dxf::{Location, Tag, TagEvent};
use crate::notification::{NotificationCollection, NotificationType};
use crate::overlay::{HandleGroup, HandlePointer, PointerKind};
use crate::record::{EntityRecord, FieldValue};
use crate::schema::{FieldDef, RecordSchema, SchemaItem};
use crate::types::{DxfVersion, Handle, Value};
use ahash::AHashMap;

/// Decode one record.
///
/// The `0 <keyword>` tag has already been consumed. Tags are pulled until
/// the next `0` tag, which is pushed back, or the end of the stream.
///
/// Unknown group codes, unexpected subclass markers, fields newer than
/// `version` and unparseable values are reported to `notes` and decoding
/// continues. A record with an empty required field is read to its end and
/// then rejected with [`DxfError::InvalidRecord`].
pub fn decode<S: DxfStreamReader + ?Sized>(
    schema: &'static RecordSchema,
    source: &mut S,
    version: DxfVersion,
    notes: &mut NotificationCollection,
) -> Result<EntityRecord> {
    let start = source.location();
    let context = format!("decode {}", schema.type_name);
    if schema.since > version {
        notes.report(
            NotificationType::VersionMismatch,
            &start,
            &context,
            format!("{} records do not exist before {}", schema.type_name, schema.since),
        );
    }

    let mut state = DecodeState {
        record: EntityRecord::new(schema),
        has_handle: schema.items.iter().any(|item| matches!(item, SchemaItem::Handle)),
        has_owners: schema.items.iter().any(|item| matches!(item, SchemaItem::Owners)),
        handle_seen: false,
        occurrences: AHashMap::new(),
        open_group: None,
    };

    loop {
        let tag = match source.next_tag()? {
            TagEvent::Tag(tag) => tag,
            TagEvent::EndOfEntity(tag) => {
                source.push_back(tag);
                break;
            }
            TagEvent::EndOfStream => break,
        };
        let location = source.location();
        state.accept(schema, tag, version, &location, &context, notes);
    }

    if let Some(group) = state.open_group.take() {
        notes.report(
            NotificationType::Warning,
            &start,
            &context,
            format!("group {{{} is not closed", group.name),
        );
        state.record.handles.groups.push(group);
    }

    for def in schema.required_fields() {
        let empty = state
            .record
            .get_named(def.name)
            .map_or(true, FieldValue::is_empty);
        if empty {
            return Err(DxfError::InvalidRecord {
                location: start,
                type_name: schema.type_name.to_string(),
                reason: format!("required field {} (code {}) is empty", def.name, def.code),
            });
        }
    }

    Ok(state.record)
}

struct DecodeState {
    record: EntityRecord,
    has_handle: bool,
    has_owners: bool,
    handle_seen: bool,
    /// Occurrences seen so far per field code
    occurrences: AHashMap<i32, usize>,
    open_group: Option<HandleGroup>,
}

impl DecodeState {
    fn accept(
        &mut self,
        schema: &'static RecordSchema,
        tag: Tag,
        version: DxfVersion,
        location: &Location,
        context: &str,
        notes: &mut NotificationCollection,
    ) {
        match tag.code {
            999 => notes.report(NotificationType::Comment, location, context, tag.value),
            102 => self.accept_brace(&tag, location, context, notes),
            code if self.open_group.is_some() => {
                if let Some(group) = self.open_group.as_mut() {
                    group.pointers.push(HandlePointer::new(code, tag.value));
                }
            }
            100 => {
                let marker = tag.value.trim();
                if !schema.expects_marker(marker) {
                    notes.report(
                        NotificationType::SubclassMismatch,
                        location,
                        context,
                        format!("unexpected subclass marker {}", marker),
                    );
                }
            }
            code if code == schema.handle_code && self.has_handle && !self.handle_seen => {
                self.handle_seen = true;
                let handle = Handle::new(&tag.value);
                if !handle.as_str().is_empty() && handle.as_str() != "-1" {
                    self.record.handle = Some(handle);
                }
            }
            code => {
                let occurrence = self.occurrences.entry(code).or_insert(0);
                let nth = *occurrence;
                *occurrence += 1;
                match schema.field_for(code, nth) {
                    Some(def) => self.accept_field(def, &tag, version, location, context, notes),
                    None if self.has_owners && PointerKind::from_code(code).is_some() => {
                        self.record.handles.push_pointer(code, tag.value);
                    }
                    None => notes.report(
                        NotificationType::UnknownTag,
                        location,
                        context,
                        format!("group code {} is not part of {}; value '{}' discarded", code, schema.type_name, tag.value),
                    ),
                }
            }
        }
    }

    fn accept_brace(
        &mut self,
        tag: &Tag,
        location: &Location,
        context: &str,
        notes: &mut NotificationCollection,
    ) {
        let text = tag.value.trim();
        if let Some(name) = text.strip_prefix('{') {
            if let Some(unclosed) = self.open_group.take() {
                notes.report(
                    NotificationType::Warning,
                    location,
                    context,
                    format!("group {{{} is not closed", unclosed.name),
                );
                self.record.handles.groups.push(unclosed);
            }
            self.open_group = Some(HandleGroup::new(name));
        } else if text == "}" {
            match self.open_group.take() {
                Some(group) => self.record.handles.groups.push(group),
                None => notes.report(
                    NotificationType::Warning,
                    location,
                    context,
                    "closing brace without an open group",
                ),
            }
        } else {
            notes.report(
                NotificationType::UnknownTag,
                location,
                context,
                format!("102 value '{}' is neither a group start nor end", text),
            );
        }
    }

    fn accept_field(
        &mut self,
        def: &'static FieldDef,
        tag: &Tag,
        version: DxfVersion,
        location: &Location,
        context: &str,
        notes: &mut NotificationCollection,
    ) {
        if def.since > version {
            notes.report(
                NotificationType::VersionMismatch,
                location,
                context,
                format!("{} (code {}) exists only from {}; kept", def.name, def.code, def.since),
            );
        }
        match Value::parse(def.value_type(), &tag.value) {
            Some(value) => {
                if !self.record.store(def, value) {
                    notes.report(
                        NotificationType::Warning,
                        location,
                        context,
                        format!("{} (code {}) is full; value '{}' discarded", def.name, def.code, tag.value),
                    );
                }
            }
            None => notes.report(
                NotificationType::InvalidValue,
                location,
                context,
                format!(
                    "'{}' is not a valid {} for {} (code {}); default kept",
                    tag.value,
                    def.value_type(),
                    def.name,
                    def.code
                ),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::dxf::reader::TagBuffer;
    use crate::schema::{DICTIONARY, IDBUFFER, LAYER, MLINESTYLE, SORTENTSTABLE, SUN};

    fn buffer(tags: &[(i32, &str)]) -> TagBuffer {
        TagBuffer::from_tags("test", tags.iter().map(|(c, v)| Tag::new(*c, *v)))
    }

    #[test]
    fn test_decode_layer_stops_at_next_record() {
        let mut source = buffer(&[(5, "10"), (2, "WALLS"), (62, "7"), (0, "LAYER")]);
        let mut notes = NotificationCollection::new();
        let layer = decode(&LAYER, &mut source, DxfVersion::AC1009, &mut notes).unwrap();
        assert_eq!(layer.name(), Some("WALLS"));
        assert_eq!(layer.handle, Some(Handle::new("10")));
        assert!(notes.is_empty());
        assert_eq!(source.next_tag().unwrap(), TagEvent::EndOfEntity(Tag::new(0, "LAYER")));
    }

    #[test]
    fn test_overlay_groups_and_owner() {
        let mut source = buffer(&[
            (5, "10"),
            (102, "{ACAD_XDICTIONARY"),
            (360, "2A"),
            (102, "}"),
            (330, "2"),
            (100, "AcDbSymbolTableRecord"),
            (100, "AcDbLayerTableRecord"),
            (2, "0"),
        ]);
        let mut notes = NotificationCollection::new();
        let layer = decode(&LAYER, &mut source, DxfVersion::AC1015, &mut notes).unwrap();
        assert_eq!(layer.handles.xdictionary(), Some(&Handle::new("2A")));
        assert_eq!(layer.handles.soft_owner(), Some(&Handle::new("2")));
        assert!(notes.is_empty());
    }

    #[test]
    fn test_hard_owned_entries_are_fields_not_overlay() {
        let mut source = buffer(&[
            (5, "C"),
            (102, "{ACAD_XDICTIONARY"),
            (360, "2A"),
            (102, "}"),
            (330, "0"),
            (100, "AcDbDictionary"),
            (280, "1"),
            (3, "A"),
            (360, "1A"),
            (3, "B"),
            (360, "1B"),
        ]);
        let mut notes = NotificationCollection::new();
        let dictionary = decode(&DICTIONARY, &mut source, DxfVersion::AC1015, &mut notes).unwrap();
        assert_eq!(dictionary.handles.xdictionary(), Some(&Handle::new("2A")));
        assert_eq!(
            dictionary.values(360),
            &[Value::Handle(Handle::new("1A")), Value::Handle(Handle::new("1B"))]
        );
        assert_eq!(dictionary.rows_named("entry_owned_handles"), Some(&[0, 1][..]));
        assert!(dictionary.handles.pointers.iter().all(|p| p.code != 360));
    }

    #[test]
    fn test_sortentstable_without_handle_takes_first_sort_handle() {
        let tags = [(331, "A1"), (5, "B1"), (331, "A2"), (5, "B2")];
        let mut notes = NotificationCollection::new();
        let table = decode(&SORTENTSTABLE, &mut buffer(&tags), DxfVersion::AC1015, &mut notes).unwrap();
        assert_eq!(table.handle, Some(Handle::new("B1")));
        assert_eq!(table.values(5), &[Value::Handle(Handle::new("B2"))]);
        assert_eq!(table.values(331).len(), 2);

        let mut tags = tags.to_vec();
        tags.insert(0, (5, "C0"));
        let table = decode(&SORTENTSTABLE, &mut buffer(&tags), DxfVersion::AC1015, &mut notes).unwrap();
        assert_eq!(table.handle, Some(Handle::new("C0")));
        assert_eq!(
            table.values(5),
            &[Value::Handle(Handle::new("B1")), Value::Handle(Handle::new("B2"))]
        );
    }

    #[test]
    fn test_diagnostics_do_not_abort() {
        let mut source = buffer(&[
            (999, "hello"),
            (100, "AcDbEntity"),
            (2, "WALLS"),
            (62, "red"),
            (1234, "x"),
            (290, "0"),
        ]);
        let mut notes = NotificationCollection::new();
        let layer = decode(&LAYER, &mut source, DxfVersion::AC1009, &mut notes).unwrap();
        assert_eq!(layer.int(62), Some(7));
        assert_eq!(layer.flag(290), Some(false));
        assert!(notes.has_type(NotificationType::Comment));
        assert!(notes.has_type(NotificationType::SubclassMismatch));
        assert!(notes.has_type(NotificationType::InvalidValue));
        assert!(notes.has_type(NotificationType::UnknownTag));
        assert!(notes.has_type(NotificationType::VersionMismatch));
    }

    #[test]
    fn test_empty_required_field_is_invalid_record() {
        let mut source = buffer(&[(2, ""), (62, "3"), (0, "LAYER"), (2, "NEXT")]);
        let mut notes = NotificationCollection::new();
        let err = decode(&LAYER, &mut source, DxfVersion::AC1009, &mut notes).unwrap_err();
        assert!(matches!(err, DxfError::InvalidRecord { ref type_name, .. } if type_name == "LAYER"));
        assert!(!err.is_fatal());
        assert_eq!(source.next_tag().unwrap(), TagEvent::EndOfEntity(Tag::new(0, "LAYER")));
    }

    #[test]
    fn test_positional_repeats() {
        let mut source = buffer(&[
            (5, "20"),
            (330, "1F"),
            (330, "A1"),
            (330, "A2"),
        ]);
        let mut notes = NotificationCollection::new();
        let idbuffer = decode(&IDBUFFER, &mut source, DxfVersion::AC1015, &mut notes).unwrap();
        assert_eq!(idbuffer.handle_value(330), Some(&Handle::new("1F")));
        let entities = idbuffer.get_named("entities").map(FieldValue::as_slice).unwrap();
        assert_eq!(entities.len(), 2);
        assert!(idbuffer.handles.is_empty());
    }

    #[test]
    fn test_fill_color_then_element_colors() {
        let mut source = buffer(&[
            (2, "STANDARD"),
            (62, "256"),
            (49, "0.5"),
            (62, "1"),
            (6, "BYLAYER"),
            (49, "-0.5"),
            (62, "2"),
            (6, "BYLAYER"),
        ]);
        let mut notes = NotificationCollection::new();
        let style = decode(&MLINESTYLE, &mut source, DxfVersion::AC1015, &mut notes).unwrap();
        assert_eq!(style.int(62), Some(256));
        assert_eq!(
            style.get_named("element_colors").map(FieldValue::as_slice),
            Some(&[Value::Int16(1), Value::Int16(2)][..])
        );
    }

    #[test]
    fn test_record_newer_than_version_is_kept() {
        let mut source = buffer(&[(5, "3F"), (90, "1")]);
        let mut notes = NotificationCollection::new();
        let sun = decode(&SUN, &mut source, DxfVersion::AC1015, &mut notes).unwrap();
        assert_eq!(sun.int(90), Some(1));
        assert!(notes.has_type(NotificationType::VersionMismatch));
    }
}
