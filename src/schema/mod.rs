//! Declarative record schemas
//!
//! Every record type the codec understands is described by a static
//! [`RecordSchema`]: the ordered list of tags it is made of (identification
//! handle, owner-handle overlay, subclass markers, typed fields). The generic
//! decoder and encoder are driven entirely by these tables.

mod entities;
mod objects;
mod tables;

pub use entities::*;
pub use objects::*;
pub use tables::*;

use crate::io::dxf::GroupCodeValueType;
use crate::types::{DxfVersion, Value};
use ahash::AHashMap;
use bitflags::bitflags;
use once_cell::sync::Lazy;

/// Version from which subclass markers (code 100) are written
pub const MARKERS_SINCE: DxfVersion = DxfVersion::AC1012;

/// Version from which owner handles (102 groups, 330/360) are written
pub const OWNERS_SINCE: DxfVersion = DxfVersion::AC1014;

bitflags! {
    /// Field behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldFlags: u8 {
        /// The field may not be empty: decoding rejects the record and
        /// encoding refuses to write it.
        const REQUIRED = 1;
    }
}

/// How often a field may occur in one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Exactly one value; a later occurrence replaces an earlier one
    Scalar,
    /// Up to `n` values in occurrence order; extra occurrences are discarded
    Array(usize),
    /// Any number of values in occurrence order
    List,
}

/// Default value of a field, converted to the field's value type on use
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
    /// Empty text, zero or false
    Zero,
    /// Text
    Text(&'static str),
    /// Integer
    Int(i64),
    /// Double
    Real(f64),
    /// Boolean
    Flag(bool),
}

/// A typed field bound to one group code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Group code
    pub code: i32,
    /// Field name, unique within its schema
    pub name: &'static str,
    /// Value used when the field is absent
    pub default: DefaultValue,
    /// Oldest version in which the field exists
    pub since: DxfVersion,
    /// Repetition
    pub repeat: Repeat,
    /// Behaviour flags
    pub flags: FieldFlags,
}

/// Start a scalar field with a zero default, present in every version
pub const fn field(code: i32, name: &'static str) -> FieldDef {
    FieldDef {
        code,
        name,
        default: DefaultValue::Zero,
        since: DxfVersion::OLDEST,
        repeat: Repeat::Scalar,
        flags: FieldFlags::empty(),
    }
}

impl FieldDef {
    /// Set a text default
    pub const fn text(self, default: &'static str) -> Self {
        FieldDef { default: DefaultValue::Text(default), ..self }
    }

    /// Set an integer default
    pub const fn int(self, default: i64) -> Self {
        FieldDef { default: DefaultValue::Int(default), ..self }
    }

    /// Set a double default
    pub const fn real(self, default: f64) -> Self {
        FieldDef { default: DefaultValue::Real(default), ..self }
    }

    /// Set a boolean default
    pub const fn flag(self, default: bool) -> Self {
        FieldDef { default: DefaultValue::Flag(default), ..self }
    }

    /// Set the oldest version the field exists in
    pub const fn since(self, version: DxfVersion) -> Self {
        FieldDef { since: version, ..self }
    }

    /// Mark the field as required
    pub const fn required(self) -> Self {
        FieldDef { flags: self.flags.union(FieldFlags::REQUIRED), ..self }
    }

    /// Make the field a fixed-capacity array
    pub const fn array(self, capacity: usize) -> Self {
        FieldDef { repeat: Repeat::Array(capacity), ..self }
    }

    /// Make the field a growable list
    pub const fn list(self) -> Self {
        FieldDef { repeat: Repeat::List, ..self }
    }

    /// Value type implied by the group code
    pub fn value_type(&self) -> GroupCodeValueType {
        GroupCodeValueType::from_code(self.code)
    }

    /// Whether the field must not be empty
    pub fn is_required(&self) -> bool {
        self.flags.contains(FieldFlags::REQUIRED)
    }

    /// Whether the field holds more than one value
    pub fn is_repeated(&self) -> bool {
        self.repeat != Repeat::Scalar
    }

    /// The default as a typed value
    pub fn default_value(&self) -> Value {
        let value_type = self.value_type();
        let value = match self.default {
            DefaultValue::Zero => None,
            DefaultValue::Text(s) => Value::from(s).coerce(value_type),
            DefaultValue::Int(i) => Value::Int64(i).coerce(value_type),
            DefaultValue::Real(r) => Value::Double(r).coerce(value_type),
            DefaultValue::Flag(b) => Value::Bool(b).coerce(value_type),
        };
        value.unwrap_or_else(|| Value::zero(value_type))
    }
}

/// One element of a record layout, in write order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaItem {
    /// The identification handle (code 5, or the schema's handle code)
    Handle,
    /// The owner-handle overlay: 102 groups and ungrouped 330/360 pointers
    Owners,
    /// A subclass marker (code 100)
    Marker {
        /// Marker text, e.g. `AcDbLayerTableRecord`
        name: &'static str,
        /// Oldest version the marker is written for
        since: DxfVersion,
    },
    /// A typed field
    Field(FieldDef),
}

/// A subclass marker written from release 13 on
pub const fn marker(name: &'static str) -> SchemaItem {
    SchemaItem::Marker { name, since: MARKERS_SINCE }
}

/// Static description of one record type
#[derive(Debug)]
pub struct RecordSchema {
    /// Keyword following the `0` group code, e.g. `LAYER`
    pub type_name: &'static str,
    /// Group code of the identification handle
    pub handle_code: i32,
    /// Oldest version the record type exists in
    pub since: DxfVersion,
    /// Layout in write order
    pub items: &'static [SchemaItem],
}

impl RecordSchema {
    /// Iterate over the field definitions in declared order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDef> + '_ {
        self.items.iter().filter_map(|item| match item {
            SchemaItem::Field(def) => Some(def),
            _ => None,
        })
    }

    /// First field bound to a group code
    pub fn field(&self, code: i32) -> Option<&FieldDef> {
        self.fields().find(|def| def.code == code)
    }

    /// Field with a given name
    pub fn field_named(&self, name: &str) -> Option<&FieldDef> {
        self.fields().find(|def| def.name == name)
    }

    /// Field receiving the `occurrence`-th (0-based) tag with `code`.
    ///
    /// When several fields share a group code they are filled in declared
    /// order: each scalar takes one occurrence, each array up to its
    /// capacity, and a list takes all remaining ones. Once every field is
    /// used up, the last one receives further occurrences.
    pub fn field_for(&self, code: i32, occurrence: usize) -> Option<&FieldDef> {
        let mut remaining = occurrence;
        let mut last = None;
        for def in self.fields().filter(|def| def.code == code) {
            last = Some(def);
            match def.repeat {
                Repeat::Scalar if remaining == 0 => return Some(def),
                Repeat::Scalar => remaining -= 1,
                Repeat::Array(capacity) if remaining < capacity => return Some(def),
                Repeat::Array(capacity) => remaining -= capacity,
                Repeat::List => return Some(def),
            }
        }
        last
    }

    /// First field of the repeated run `def` trails, if any.
    ///
    /// Adjacent repeated fields form a run; each value of the first field
    /// opens a row that the values of the other fields attach to.
    pub fn run_leader(&self, def: &FieldDef) -> Option<&FieldDef> {
        if !def.is_repeated() {
            return None;
        }
        let is_repeated = |item: &SchemaItem| matches!(item, SchemaItem::Field(f) if f.is_repeated());
        let position = self
            .items
            .iter()
            .position(|item| matches!(item, SchemaItem::Field(f) if f.name == def.name))?;
        let start = self.items[..position]
            .iter()
            .rposition(|item| !is_repeated(item))
            .map_or(0, |index| index + 1);
        match &self.items[start] {
            SchemaItem::Field(leader) if start < position => Some(leader),
            _ => None,
        }
    }

    /// Iterate over the subclass markers in declared order
    pub fn markers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.items.iter().filter_map(|item| match item {
            SchemaItem::Marker { name, .. } => Some(*name),
            _ => None,
        })
    }

    /// Whether the schema declares a subclass marker
    pub fn expects_marker(&self, name: &str) -> bool {
        self.markers().any(|marker| marker == name)
    }

    /// Fields that must not be empty
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDef> + '_ {
        self.fields().filter(|def| def.is_required())
    }
}

impl PartialEq for RecordSchema {
    fn eq(&self, other: &Self) -> bool {
        self.type_name == other.type_name
    }
}

/// Every schema known to the codec
pub static ALL_SCHEMAS: &[&RecordSchema] = &[
    // structure
    &TABLE,
    &CLASS,
    // tables
    &APPID,
    &BLOCK_RECORD,
    &DIMSTYLE,
    &LAYER,
    &LTYPE,
    &STYLE,
    &UCS,
    &VIEW,
    &VPORT,
    // objects
    &ACDBPLACEHOLDER,
    &DICTIONARY,
    &DICTIONARYVAR,
    &GROUP,
    &IDBUFFER,
    &IMAGEDEF,
    &IMAGEDEF_REACTOR,
    &LAYER_FILTER,
    &LAYER_INDEX,
    &MLINESTYLE,
    &RASTERVARIABLES,
    &SORTENTSTABLE,
    &SPATIAL_INDEX,
    &SUN,
    &VBA_PROJECT,
    &WIPEOUTVARIABLES,
    // entities
    &FACE3D,
    &ARC,
    &ATTDEF,
    &CIRCLE,
    &ELLIPSE,
    &IMAGE,
    &INSERT,
    &LINE,
    &POINT,
    &RAY,
    &SEQEND,
    &SHAPE,
    &SOLID,
    &TEXT,
    &TRACE,
    &VERTEX,
    &XLINE,
];

static REGISTRY: Lazy<AHashMap<&'static str, &'static RecordSchema>> = Lazy::new(|| {
    ALL_SCHEMAS
        .iter()
        .map(|schema| (schema.type_name, *schema))
        .collect()
});

/// Look up the schema for a record keyword
pub fn schema_for(type_name: &str) -> Option<&'static RecordSchema> {
    REGISTRY.get(type_name.trim()).copied()
}
