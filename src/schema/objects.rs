//! Non-graphical objects (OBJECTS section)
//!
//! Some objects repeat group code 330 after the owner pointer. Those are
//! modelled as an `owner` field placed before the subclass marker followed
//! by the field that takes the remaining occurrences, so the first 330
//! always lands in `owner` (see [`RecordSchema::field_for`]).

use super::SchemaItem::{Field, Handle, Owners};
use super::{field, marker, RecordSchema, OWNERS_SINCE};
use crate::types::DxfVersion::{AC1012, AC1014, AC1015, AC1021};

/// Expands to an object schema: handle and owners, then the type's items.
macro_rules! object {
    ($type_name:literal, $since:expr, [$($item:expr),* $(,)?]) => {
        RecordSchema {
            type_name: $type_name,
            handle_code: 5,
            since: $since,
            items: &[Handle, Owners, $($item),*],
        }
    };
}

/// Placeholder object
pub static ACDBPLACEHOLDER: RecordSchema = object!("ACDBPLACEHOLDER", AC1014, []);

/// Dictionary; each entry name (3) opens a row holding its soft-owned
/// (350) or, in hard-owner dictionaries, hard-owned (360) object
pub static DICTIONARY: RecordSchema = object!("DICTIONARY", AC1012, [
    marker("AcDbDictionary"),
    Field(field(280, "hard_owner").since(AC1015)),
    Field(field(281, "cloning").int(1).since(AC1015)),
    Field(field(3, "entry_names").list()),
    Field(field(350, "entry_handles").list()),
    Field(field(360, "entry_owned_handles").list()),
]);

/// Named variable stored in a dictionary
pub static DICTIONARYVAR: RecordSchema = object!("DICTIONARYVAR", AC1015, [
    marker("DictionaryVariables"),
    Field(field(280, "object_schema")),
    Field(field(1, "value")),
]);

/// Entity group
pub static GROUP: RecordSchema = object!("GROUP", AC1012, [
    marker("AcDbGroup"),
    Field(field(300, "description")),
    Field(field(70, "unnamed")),
    Field(field(71, "selectable").int(1)),
    Field(field(340, "entities").list()),
]);

/// Buffer of entity handles used by the layer index
pub static IDBUFFER: RecordSchema = object!("IDBUFFER", AC1014, [
    Field(field(330, "owner").since(OWNERS_SINCE)),
    marker("AcDbIdBuffer"),
    Field(field(330, "entities").list()),
]);

/// Raster image definition
pub static IMAGEDEF: RecordSchema = object!("IMAGEDEF", AC1014, [
    marker("AcDbRasterImageDef"),
    Field(field(90, "class_version")),
    Field(field(1, "file_name").required()),
    Field(field(10, "size_u")),
    Field(field(20, "size_v")),
    Field(field(11, "pixel_size_u").real(1.0)),
    Field(field(21, "pixel_size_v").real(1.0)),
    Field(field(280, "loaded").int(1)),
    Field(field(281, "resolution_units")),
]);

/// Reactor linking an image definition to one image entity
pub static IMAGEDEF_REACTOR: RecordSchema = object!("IMAGEDEF_REACTOR", AC1014, [
    Field(field(330, "owner").since(OWNERS_SINCE)),
    marker("AcDbRasterImageDefReactor"),
    Field(field(90, "class_version").int(2)),
    Field(field(330, "image")),
]);

/// Layer filter
pub static LAYER_FILTER: RecordSchema = object!("LAYER_FILTER", AC1014, [
    marker("AcDbFilter"),
    marker("AcDbLayerFilter"),
    Field(field(8, "layer_names").list()),
]);

/// Layer index; name (8), buffer (360) and count (90) form one run
pub static LAYER_INDEX: RecordSchema = object!("LAYER_INDEX", AC1014, [
    marker("AcDbIndex"),
    Field(field(40, "timestamp")),
    marker("AcDbLayerIndex"),
    Field(field(8, "layer_names").list()),
    Field(field(360, "id_buffers").list()),
    Field(field(90, "entry_counts").list()),
]);

/// Most elements a multiline style can hold
pub const MLINE_MAX_ELEMENTS: usize = 16;

/// Multiline style
///
/// The first 62 is the fill color; every further 62 belongs to the element
/// run (offset 49, color 62, linetype 6).
pub static MLINESTYLE: RecordSchema = object!("MLINESTYLE", AC1012, [
    marker("AcDbMlineStyle"),
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(3, "description")),
    Field(field(62, "fill_color").int(256)),
    Field(field(51, "start_angle").real(90.0)),
    Field(field(52, "end_angle").real(90.0)),
    Field(field(71, "element_count")),
    Field(field(49, "element_offsets").array(MLINE_MAX_ELEMENTS)),
    Field(field(62, "element_colors").array(MLINE_MAX_ELEMENTS)),
    Field(field(6, "element_linetypes").array(MLINE_MAX_ELEMENTS)),
]);

/// Raster display settings
pub static RASTERVARIABLES: RecordSchema = object!("RASTERVARIABLES", AC1014, [
    marker("AcDbRasterVariables"),
    Field(field(90, "class_version")),
    Field(field(70, "image_frame").int(1)),
    Field(field(71, "image_quality").int(1)),
    Field(field(72, "units")),
]);

/// Draw order table; entity (331) and sort (5) handles form one run
///
/// The first 5 is the identification handle, later ones are sort handles.
/// A table written without its own handle therefore reads back with its
/// first sort handle as the identification handle and one sort pair short.
pub static SORTENTSTABLE: RecordSchema = object!("SORTENTSTABLE", AC1014, [
    Field(field(330, "owner").since(OWNERS_SINCE)),
    marker("AcDbSortentsTable"),
    Field(field(330, "block_record")),
    Field(field(331, "entities").list()),
    Field(field(5, "sort_handles").list()),
]);

/// Spatial index
pub static SPATIAL_INDEX: RecordSchema = object!("SPATIAL_INDEX", AC1014, [
    marker("AcDbIndex"),
    Field(field(40, "timestamp")),
    marker("AcDbSpatialIndex"),
]);

/// Sun light settings
pub static SUN: RecordSchema = object!("SUN", AC1021, [
    marker("AcDbSun"),
    Field(field(90, "version").int(1)),
    Field(field(290, "status").flag(true)),
    Field(field(63, "color").int(7)),
    Field(field(40, "intensity").real(1.0)),
    Field(field(291, "shadows").flag(true)),
    Field(field(91, "julian_day")),
    Field(field(92, "seconds_past_midnight")),
    Field(field(292, "daylight_savings")),
    Field(field(70, "shadow_type")),
    Field(field(71, "shadow_map_size").int(256)),
    Field(field(280, "shadow_softness").int(1)),
]);

/// Embedded VBA project
pub static VBA_PROJECT: RecordSchema = object!("VBA_PROJECT", AC1015, [
    marker("AcDbVbaProject"),
    Field(field(90, "data_size")),
    Field(field(310, "data").list()),
]);

/// Wipeout frame display setting
pub static WIPEOUTVARIABLES: RecordSchema = object!("WIPEOUTVARIABLES", AC1015, [
    marker("AcDbWipeoutVariables"),
    Field(field(70, "display_frame")),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_field_takes_first_330() {
        assert_eq!(IDBUFFER.field_for(330, 0).map(|d| d.name), Some("owner"));
        assert_eq!(IDBUFFER.field_for(330, 1).map(|d| d.name), Some("entities"));
        assert_eq!(IDBUFFER.field_for(330, 9).map(|d| d.name), Some("entities"));
        assert_eq!(SORTENTSTABLE.field_for(330, 1).map(|d| d.name), Some("block_record"));
        assert_eq!(IMAGEDEF_REACTOR.field_for(330, 1).map(|d| d.name), Some("image"));
    }

    #[test]
    fn test_mlinestyle_elements_are_capped() {
        assert_eq!(MLINESTYLE.field_for(62, 16).map(|d| d.name), Some("element_colors"));
        assert_eq!(MLINESTYLE.field_for(62, 40).map(|d| d.name), Some("element_colors"));
        assert_eq!(
            MLINESTYLE.field_named("element_offsets").map(|d| d.repeat),
            Some(crate::schema::Repeat::Array(MLINE_MAX_ELEMENTS))
        );
    }

    #[test]
    fn test_sun_is_2007_only() {
        assert_eq!(SUN.since, AC1021);
        assert!(SUN.fields().all(|d| d.since <= AC1021));
    }

    #[test]
    fn test_dictionary_run_is_adjacent() {
        let codes: Vec<i32> = DICTIONARY.fields().filter(|d| d.is_repeated()).map(|d| d.code).collect();
        assert_eq!(codes, [3, 350, 360]);
    }

    #[test]
    fn test_vba_project_and_group_lists() {
        assert!(VBA_PROJECT.field(310).is_some_and(|d| d.is_repeated()));
        assert!(GROUP.field(340).is_some_and(|d| d.is_repeated()));
        assert_eq!(AC1012, GROUP.since);
    }
}
