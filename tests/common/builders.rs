//! Test record builders.
//!
//! `sample_record()` fills every field a schema declares for a version with
//! a non-default value, so round-trip tests notice any field that is lost.

#![allow(dead_code)]

use dxf_records::io::dxf::GroupCodeValueType;
use dxf_records::schema::{FieldDef, RecordSchema, Repeat, SchemaItem, LAYER, OWNERS_SINCE};
use dxf_records::types::{DxfVersion, Handle, Value};
use dxf_records::EntityRecord;

/// Rows written for every array or list field.
pub const SAMPLE_ROWS: usize = 2;

/// The two-layer table fragment used by the scenario tests.
pub const TWO_LAYERS: &str = "0\nLAYER\n2\nWALLS\n70\n0\n62\n7\n6\nCONTINUOUS\n0\nLAYER\n2\nDOORS\n70\n0\n62\n1\n6\nCONTINUOUS\n0\nENDTAB\n";

/// A distinct sample value for one row of a field.
pub fn sample_value(def: &FieldDef, row: usize) -> Value {
    use GroupCodeValueType as T;
    match def.value_type() {
        T::String => Value::Text(format!("{}_{}", def.name, row)),
        T::Double | T::Float => Value::Double(2.5 + row as f64),
        T::Byte => Value::Byte(3 + row as i8),
        T::Int16 => Value::Int16(11 + row as i16),
        T::Int32 => Value::Int32(70_000 + row as i32),
        T::Int64 => Value::Int64(5_000_000_000 + row as i64),
        T::Bool => Value::Bool(row % 2 == 0),
        T::Handle => Value::Handle(Handle::new(format!("{:X}", 0x400 + def.code as usize * 4 + row))),
        T::Binary => Value::Binary(format!("0102ABCD{:02X}", row)),
    }
}

/// A record with every field present in `version` set to a sample value.
///
/// Fields newer than `version` keep their defaults. Records with an
/// identification handle get one; from release 14 on they also carry a
/// reactor group, an extension dictionary and, unless the schema binds
/// code 330 to a field, an ungrouped owner pointer.
pub fn sample_record(schema: &'static RecordSchema, version: DxfVersion) -> EntityRecord {
    let mut record = EntityRecord::new(schema);
    let present: Vec<&FieldDef> = schema.fields().filter(|def| def.since <= version).collect();
    for def in present.iter().filter(|def| def.repeat == Repeat::Scalar) {
        record
            .set_named(def.name, sample_value(def, 0))
            .unwrap_or_else(|e| panic!("{}.{}: {e}", schema.type_name, def.name));
    }
    // Row by row, so each run keeps its values together the way a file does.
    for row in 0..SAMPLE_ROWS {
        for def in present.iter().filter(|def| def.is_repeated()) {
            record
                .push_named(def.name, sample_value(def, row))
                .unwrap_or_else(|e| panic!("{}.{}: {e}", schema.type_name, def.name));
        }
    }

    if schema.items.iter().any(|item| matches!(item, SchemaItem::Handle)) {
        record.handle = Some(Handle::new("2A"));
    }
    let has_owners = schema.items.iter().any(|item| matches!(item, SchemaItem::Owners));
    if has_owners && version >= OWNERS_SINCE {
        record.handles.add_reactor("1F");
        record.handles.set_xdictionary("3B");
        if schema.field(330).is_none() {
            record.handles.set_soft_owner("1C");
        }
    }
    record
}

/// A layer with a name and color and every other field at its default.
pub fn layer(name: &str, color: i16) -> EntityRecord {
    let mut layer = EntityRecord::new(&LAYER);
    layer.set(2, name).expect("LAYER has a name field");
    layer.set(62, color).expect("LAYER has a color field");
    layer
}
