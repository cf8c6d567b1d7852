//! Schema-driven record encoding

use super::stream_writer::{DxfStreamWriter, DxfStreamWriterExt};
use crate::error::{DxfError, Result};
use crate::io::dxf::{GroupCodeValueType, Tag};
use crate::record::{EntityRecord, FieldValue};
use crate::schema::{FieldDef, RecordSchema, SchemaItem, OWNERS_SINCE};
use crate::types::{DxfVersion, Value};

/// Encode a record into its tag sequence.
///
/// The sequence starts with `0 <type>`, followed by the schema's items in
/// declared order. Markers and fields newer than `version` are left out,
/// as is the owner overlay before release 14. Empty handle fields are
/// omitted; every other field is written, defaults included. Adjacent
/// repeated fields are written row by row.
///
/// Fails before producing anything if a required field is empty.
pub fn encode_tags(schema: &RecordSchema, record: &EntityRecord, version: DxfVersion) -> Result<Vec<Tag>> {
    if record.schema() != schema {
        return Err(DxfError::SchemaMismatch {
            expected: schema.type_name.to_string(),
            found: record.type_name().to_string(),
        });
    }
    for def in schema.required_fields().filter(|def| def.since <= version) {
        if record.get_named(def.name).map_or(true, FieldValue::is_empty) {
            return Err(DxfError::MissingRequiredField {
                type_name: schema.type_name.to_string(),
                code: def.code,
                field: def.name,
            });
        }
    }

    let items = schema.items;
    let mut tags = vec![Tag::new(0, schema.type_name)];
    let mut index = 0;
    while index < items.len() {
        match &items[index] {
            SchemaItem::Handle => {
                if let Some(handle) = record
                    .handle
                    .as_ref()
                    .filter(|h| !h.as_str().is_empty() && h.as_str() != "-1") {
                    tags.push(Tag::new(schema.handle_code, handle.as_str()));
                }
            }
            SchemaItem::Owners => {
                if version >= OWNERS_SINCE {
                    record.handles.encode_into(&mut tags);
                }
            }
            SchemaItem::Marker { name, since } => {
                if version >= *since {
                    tags.push(Tag::new(100, *name));
                }
            }
            SchemaItem::Field(def) if def.is_repeated() => {
                let run = repeated_run(&items[index..]);
                encode_run(&run, record, version, &mut tags);
                index += run.len();
                continue;
            }
            SchemaItem::Field(def) => {
                if def.since <= version {
                    if let Some(FieldValue::Single(value)) = record.get_named(def.name) {
                        push_value(def, value, &mut tags);
                    }
                }
            }
        }
        index += 1;
    }
    Ok(tags)
}

/// Encode a record and write it; nothing is written if encoding fails
pub fn encode<W: DxfStreamWriter + ?Sized>(
    schema: &RecordSchema,
    record: &EntityRecord,
    version: DxfVersion,
    writer: &mut W,
) -> Result<()> {
    let tags = encode_tags(schema, record, version)?;
    writer.write_tags(&tags)
}

/// Leading repeated fields of `items`
fn repeated_run(items: &'static [SchemaItem]) -> Vec<&'static FieldDef> {
    items
        .iter()
        .map_while(|item| match item {
            SchemaItem::Field(def) if def.is_repeated() => Some(def),
            _ => None,
        })
        .collect()
}

/// Write a run row by row: each value of the first field, then the values
/// of the other fields that belong to its row
fn encode_run(run: &[&'static FieldDef], record: &EntityRecord, version: DxfVersion, tags: &mut Vec<Tag>) {
    let Some((leader, trailing)) = run.split_first() else {
        return;
    };
    let leading: &[Value] = if leader.since <= version {
        record.get_named(leader.name).map(FieldValue::as_slice).unwrap_or(&[])
    } else {
        &[]
    };
    let columns: Vec<(&FieldDef, Vec<(usize, &Value)>)> = trailing
        .iter()
        .filter(|def| def.since <= version)
        .map(|def| {
            let values = record.get_named(def.name).map(FieldValue::as_slice).unwrap_or(&[]);
            let rows = record.rows_named(def.name).unwrap_or(&[]);
            let column = values
                .iter()
                .enumerate()
                .map(|(index, value)| (rows.get(index).copied().unwrap_or(index), value))
                .collect();
            (*def, column)
        })
        .collect();

    let last_row = columns
        .iter()
        .flat_map(|(_, column)| column.iter().map(|(row, _)| row + 1))
        .max()
        .unwrap_or(0);
    for row in 0..leading.len().max(last_row) {
        if let Some(value) = leading.get(row) {
            push_value(leader, value, tags);
        }
        for (def, column) in &columns {
            for (_, value) in column.iter().filter(|(at, _)| *at == row) {
                push_value(def, value, tags);
            }
        }
    }
}

fn push_value(def: &FieldDef, value: &Value, tags: &mut Vec<Tag>) {
    if def.value_type() == GroupCodeValueType::Handle && value.is_empty_text() {
        return;
    }
    tags.push(Tag::new(def.code, value.to_string()));
}
