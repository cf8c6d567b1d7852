//! Decoded records
//!
//! An [`EntityRecord`] is one instance of a schema: its identification
//! handle, its owner-handle overlay, and one typed value per schema field.
//! Field values are kept in declared order, so iterating a record walks the
//! fields in the order they are written.

use crate::error::{DxfError, Result};
use crate::overlay::HandleOverlay;
use crate::schema::{schema_for, FieldDef, RecordSchema, Repeat};
use crate::types::{Handle, StandardFlags, Value};
use indexmap::IndexMap;
use std::slice;

/// Storage for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A scalar field
    Single(Value),
    /// An array or list field, in occurrence order
    Many(Vec<Value>),
}

impl FieldValue {
    /// All stored values
    pub fn as_slice(&self) -> &[Value] {
        match self {
            FieldValue::Single(value) => slice::from_ref(value),
            FieldValue::Many(values) => values,
        }
    }

    /// Whether the field holds no meaningful value (empty text or no elements)
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Single(value) => value.is_empty_text(),
            FieldValue::Many(values) => values.is_empty(),
        }
    }
}

/// One decoded record of a given type
#[derive(Debug, Clone)]
pub struct EntityRecord {
    schema: &'static RecordSchema,
    /// Identification handle; `None` means none is written
    pub handle: Option<Handle>,
    /// Owner dictionaries, reactors and other handle references
    pub handles: HandleOverlay,
    fields: IndexMap<&'static str, FieldValue>,
    /// Row of each value of a field trailing a repeated run
    rows: IndexMap<&'static str, Vec<usize>>,
}

impl EntityRecord {
    /// Create a record with every field at its default
    pub fn new(schema: &'static RecordSchema) -> Self {
        let fields = schema
            .fields()
            .map(|def| {
                let value = match def.repeat {
                    Repeat::Scalar => FieldValue::Single(def.default_value()),
                    Repeat::Array(_) | Repeat::List => FieldValue::Many(Vec::new()),
                };
                (def.name, value)
            })
            .collect();
        Self {
            schema,
            handle: None,
            handles: HandleOverlay::default(),
            fields,
            rows: IndexMap::new(),
        }
    }

    /// Create a default record for a record keyword, if it has a schema
    pub fn for_type(type_name: &str) -> Option<Self> {
        schema_for(type_name).map(Self::new)
    }

    /// Builder-style handle assignment
    pub fn with_handle(mut self, handle: impl Into<Handle>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    /// The record's schema
    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    /// The record keyword, e.g. `LAYER`
    pub fn type_name(&self) -> &'static str {
        self.schema.type_name
    }

    /// Iterate over fields and their values in declared order
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldDef, &FieldValue)> + '_ {
        self.schema
            .fields()
            .filter_map(move |def| self.fields.get(def.name).map(|value| (def, value)))
    }

    /// Value of a field by name
    pub fn get_named(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Row of each value of a field that trails a repeated run.
    ///
    /// A value belongs to the row opened by the latest value of the run's
    /// first field when it was stored (row 0 if there was none). `None` for
    /// scalars and for the first field of a run, whose n-th value is row n.
    pub fn rows_named(&self, name: &str) -> Option<&[usize]> {
        self.rows.get(name).map(Vec::as_slice)
    }

    /// First value of the first field bound to `code`
    pub fn get(&self, code: i32) -> Option<&Value> {
        self.values(code).first()
    }

    /// All values of the first field bound to `code`
    pub fn values(&self, code: i32) -> &[Value] {
        self.schema
            .field(code)
            .and_then(|def| self.fields.get(def.name))
            .map(FieldValue::as_slice)
            .unwrap_or(&[])
    }

    /// Text value of a field
    pub fn text(&self, code: i32) -> Option<&str> {
        self.get(code).and_then(Value::as_str)
    }

    /// Integer value of a field
    pub fn int(&self, code: i32) -> Option<i64> {
        self.get(code).and_then(Value::as_i64)
    }

    /// Double value of a field
    pub fn double(&self, code: i32) -> Option<f64> {
        self.get(code).and_then(Value::as_f64)
    }

    /// Boolean value of a field
    pub fn flag(&self, code: i32) -> Option<bool> {
        self.get(code).and_then(Value::as_bool)
    }

    /// Handle value of a field
    pub fn handle_value(&self, code: i32) -> Option<&Handle> {
        self.get(code).and_then(Value::as_handle)
    }

    /// The record name (group code 2), when the schema has one
    pub fn name(&self) -> Option<&str> {
        self.text(2)
    }

    /// Standard symbol table flags (group code 70)
    pub fn standard_flags(&self) -> StandardFlags {
        let bits = self.int(70).unwrap_or(0);
        StandardFlags::from_bits_truncate(bits as i16)
    }

    /// Set the first field bound to `code`.
    ///
    /// The value is converted to the field's value type. A repeated field is
    /// replaced by the single value.
    pub fn set(&mut self, code: i32, value: impl Into<Value>) -> Result<()> {
        let def = self.field_def(code)?;
        self.set_field(def, value.into())
    }

    /// Set a field by name
    pub fn set_named(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let def = self.schema.field_named(name).ok_or_else(|| self.unknown(0))?;
        self.set_field(def, value.into())
    }

    /// Append a value to the first repeated field bound to `code`
    pub fn push(&mut self, code: i32, value: impl Into<Value>) -> Result<()> {
        let def = self
            .schema
            .fields()
            .find(|def| def.code == code && def.is_repeated())
            .ok_or_else(|| self.unknown(code))?;
        self.push_field(def, value.into())
    }

    /// Append a value to a repeated field by name
    pub fn push_named(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let def = self
            .schema
            .field_named(name)
            .filter(|def| def.is_repeated())
            .ok_or_else(|| self.unknown(0))?;
        self.push_field(def, value.into())
    }

    fn push_field(&mut self, def: &'static FieldDef, value: Value) -> Result<()> {
        let value = Self::convert(def, value)?;
        if self.store(def, value) {
            Ok(())
        } else {
            let capacity = match def.repeat {
                Repeat::Array(capacity) => capacity,
                _ => 0,
            };
            Err(DxfError::ArrayFull { code: def.code, capacity })
        }
    }

    /// Reset the first field bound to `code` to its default
    pub fn clear(&mut self, code: i32) -> Result<()> {
        let def = self.field_def(code)?;
        let value = match def.repeat {
            Repeat::Scalar => FieldValue::Single(def.default_value()),
            _ => FieldValue::Many(Vec::new()),
        };
        self.fields.insert(def.name, value);
        self.rows.shift_remove(def.name);
        Ok(())
    }

    /// Store a decoded value; returns false when an array is already full
    pub(crate) fn store(&mut self, def: &'static FieldDef, value: Value) -> bool {
        let row = self.current_row(def);
        let slot = self
            .fields
            .entry(def.name)
            .or_insert_with(|| FieldValue::Many(Vec::new()));
        match (def.repeat, slot) {
            (Repeat::Scalar, slot) => *slot = FieldValue::Single(value),
            (repeat, FieldValue::Many(values)) => {
                if let Repeat::Array(capacity) = repeat {
                    if values.len() >= capacity {
                        return false;
                    }
                }
                values.push(value);
            }
            (_, slot) => *slot = FieldValue::Many(vec![value]),
        }
        if let Some(row) = row {
            self.rows.entry(def.name).or_default().push(row);
        }
        true
    }

    /// Row a new value of `def` joins, when `def` trails a repeated run
    fn current_row(&self, def: &FieldDef) -> Option<usize> {
        let leader = self.schema.run_leader(def)?;
        let opened = self
            .fields
            .get(leader.name)
            .map_or(0, |value| value.as_slice().len());
        Some(opened.saturating_sub(1))
    }

    fn set_field(&mut self, def: &'static FieldDef, value: Value) -> Result<()> {
        let value = Self::convert(def, value)?;
        let value = match def.repeat {
            Repeat::Scalar => FieldValue::Single(value),
            _ => FieldValue::Many(vec![value]),
        };
        self.fields.insert(def.name, value);
        self.rows.shift_remove(def.name);
        if let Some(row) = self.current_row(def) {
            self.rows.insert(def.name, vec![row]);
        }
        Ok(())
    }

    fn convert(def: &FieldDef, value: Value) -> Result<Value> {
        value.coerce(def.value_type()).ok_or_else(|| DxfError::InvalidValue {
            code: def.code,
            value: value.to_string(),
        })
    }

    fn field_def(&self, code: i32) -> Result<&'static FieldDef> {
        self.schema.field(code).ok_or_else(|| self.unknown(code))
    }

    fn unknown(&self, code: i32) -> DxfError {
        DxfError::UnknownField {
            type_name: self.schema.type_name.to_string(),
            code,
        }
    }
}

impl PartialEq for EntityRecord {
    fn eq(&self, other: &Self) -> bool {
        self.schema.type_name == other.schema.type_name
            && self.handle == other.handle
            && self.handles == other.handles
            && self.fields == other.fields
            && self.rows == other.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LAYER, LTYPE, MLINESTYLE, MLINE_MAX_ELEMENTS};

    #[test]
    fn test_new_record_has_defaults() {
        let layer = EntityRecord::new(&LAYER);
        assert_eq!(layer.type_name(), "LAYER");
        assert_eq!(layer.int(62), Some(7));
        assert_eq!(layer.text(6), Some("CONTINUOUS"));
        assert_eq!(layer.flag(290), Some(true));
        assert_eq!(layer.name(), Some(""));
        assert!(layer.handle.is_none());
    }

    #[test]
    fn test_set_coerces_to_field_type() {
        let mut layer = EntityRecord::for_type("LAYER").unwrap();
        layer.set(2, "WALLS").unwrap();
        layer.set(62, 1i64).unwrap();
        layer.set(70, "5").unwrap();
        assert_eq!(layer.name(), Some("WALLS"));
        assert_eq!(layer.get(62), Some(&Value::Int16(1)));
        assert!(layer.standard_flags().contains(StandardFlags::FROZEN | StandardFlags::LOCKED));
    }

    #[test]
    fn test_set_rejects_unknown_code_and_bad_value() {
        let mut layer = EntityRecord::new(&LAYER);
        assert!(matches!(layer.set(1234, 1i64), Err(DxfError::UnknownField { code: 1234, .. })));
        assert!(matches!(layer.set(62, "red"), Err(DxfError::InvalidValue { code: 62, .. })));
    }

    #[test]
    fn test_push_appends_to_list() {
        let mut ltype = EntityRecord::new(&LTYPE);
        ltype.push(49, 0.5).unwrap();
        ltype.push(49, -0.25).unwrap();
        assert_eq!(ltype.values(49), &[Value::Double(0.5), Value::Double(-0.25)]);
        assert!(ltype.push(2, "x").is_err());
    }

    #[test]
    fn test_push_respects_array_capacity() {
        let mut style = EntityRecord::new(&MLINESTYLE);
        for _ in 0..MLINE_MAX_ELEMENTS {
            style.push(49, 0.5).unwrap();
        }
        assert!(matches!(
            style.push(49, 0.5),
            Err(DxfError::ArrayFull { code: 49, capacity: MLINE_MAX_ELEMENTS })
        ));
    }

    #[test]
    fn test_named_access_reaches_shared_codes() {
        let mut style = EntityRecord::new(&MLINESTYLE);
        style.set_named("element_colors", 3i64).unwrap();
        assert_eq!(style.int(62), Some(256));
        assert_eq!(
            style.get_named("element_colors").map(FieldValue::as_slice),
            Some(&[Value::Int16(3)][..])
        );
    }

    #[test]
    fn test_trailing_values_remember_their_dash() {
        let mut ltype = EntityRecord::new(&LTYPE);
        ltype.push(49, 1.0).unwrap();
        ltype.push(74, 0i64).unwrap();
        ltype.push(49, -0.5).unwrap();
        ltype.push(74, 4i64).unwrap();
        ltype.push(75, 132i64).unwrap();
        assert_eq!(ltype.rows_named("element_types"), Some(&[0, 1][..]));
        assert_eq!(ltype.rows_named("shape_numbers"), Some(&[1][..]));
        assert_eq!(ltype.rows_named("dash_lengths"), None);

        ltype.clear(75).unwrap();
        assert_eq!(ltype.rows_named("shape_numbers"), None);
        ltype.set(75, 7i64).unwrap();
        assert_eq!(ltype.rows_named("shape_numbers"), Some(&[1][..]));
    }

    #[test]
    fn test_clear_restores_default() {
        let mut layer = EntityRecord::new(&LAYER);
        layer.set(62, 3i64).unwrap();
        layer.clear(62).unwrap();
        assert_eq!(layer, EntityRecord::new(&LAYER));
    }
}
