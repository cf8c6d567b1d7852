//! Symbol table records, the TABLE header and CLASS

use super::SchemaItem::{Field, Handle, Owners};
use super::{field, marker, RecordSchema};
use crate::types::DxfVersion::{AC1012, AC1015, AC1018, AC1021};
use crate::types::DxfVersion;

/// Expands to a symbol table record schema: handle, owners, the
/// `AcDbSymbolTableRecord` marker, the type's own marker, then its fields.
macro_rules! table_record {
    ($type_name:literal, $handle_code:literal, $since:expr, $marker:literal, [$($item:expr),* $(,)?]) => {
        RecordSchema {
            type_name: $type_name,
            handle_code: $handle_code,
            since: $since,
            items: &[
                Handle,
                Owners,
                marker("AcDbSymbolTableRecord"),
                marker($marker),
                $($item),*
            ],
        }
    };
}

/// `0 TABLE` header preceding the records of one symbol table
pub static TABLE: RecordSchema = RecordSchema {
    type_name: "TABLE",
    handle_code: 5,
    since: DxfVersion::OLDEST,
    items: &[
        Field(field(2, "name").required()),
        Handle,
        Owners,
        marker("AcDbSymbolTable"),
        Field(field(70, "max_entries")),
    ],
};

/// Application-defined class, CLASSES section
pub static CLASS: RecordSchema = RecordSchema {
    type_name: "CLASS",
    handle_code: 5,
    since: AC1012,
    items: &[
        Field(field(1, "record_name").required()),
        Field(field(2, "class_name")),
        Field(field(3, "application_name")),
        Field(field(90, "proxy_flags")),
        Field(field(91, "instance_count").since(AC1018)),
        Field(field(280, "was_proxy")),
        Field(field(281, "is_entity")),
    ],
};

/// Registered application
pub static APPID: RecordSchema = table_record!("APPID", 5, DxfVersion::OLDEST, "AcDbRegAppTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
]);

/// Block table record
pub static BLOCK_RECORD: RecordSchema = table_record!("BLOCK_RECORD", 5, AC1012, "AcDbBlockTableRecord", [
    Field(field(2, "name").required()),
    Field(field(340, "layout").since(AC1015)),
    Field(field(70, "insert_units").since(AC1015)),
    Field(field(280, "explodable").int(1).since(AC1015)),
    Field(field(281, "scalable").int(1).since(AC1015)),
    Field(field(310, "preview").since(AC1015).list()),
]);

/// Dimension style; its identification handle uses group code 105
pub static DIMSTYLE: RecordSchema = table_record!("DIMSTYLE", 105, DxfVersion::OLDEST, "AcDbDimStyleTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(3, "dimpost")),
    Field(field(4, "dimapost")),
    Field(field(5, "dimblk")),
    Field(field(6, "dimblk1")),
    Field(field(7, "dimblk2")),
    Field(field(40, "dimscale").real(1.0)),
    Field(field(41, "dimasz").real(0.18)),
    Field(field(42, "dimexo").real(0.0625)),
    Field(field(43, "dimdli").real(0.38)),
    Field(field(44, "dimexe").real(0.18)),
    Field(field(45, "dimrnd")),
    Field(field(46, "dimdle")),
    Field(field(47, "dimtp")),
    Field(field(48, "dimtm")),
    Field(field(140, "dimtxt").real(0.18)),
    Field(field(141, "dimcen").real(0.09)),
    Field(field(142, "dimtsz")),
    Field(field(143, "dimaltf").real(25.4)),
    Field(field(144, "dimlfac").real(1.0)),
    Field(field(145, "dimtvp")),
    Field(field(146, "dimtfac").real(1.0)),
    Field(field(147, "dimgap").real(0.09).since(AC1012)),
    Field(field(71, "dimtol")),
    Field(field(72, "dimlim")),
    Field(field(73, "dimtih").int(1)),
    Field(field(74, "dimtoh").int(1)),
    Field(field(75, "dimse1")),
    Field(field(76, "dimse2")),
    Field(field(77, "dimtad")),
    Field(field(78, "dimzin")),
    Field(field(170, "dimalt")),
    Field(field(171, "dimaltd").int(2)),
    Field(field(172, "dimtofl")),
    Field(field(173, "dimsah")),
    Field(field(174, "dimtix")),
    Field(field(175, "dimsoxd")),
    Field(field(176, "dimclrd")),
    Field(field(177, "dimclre")),
    Field(field(178, "dimclrt")),
    Field(field(270, "dimunit").int(2).since(AC1012)),
    Field(field(271, "dimdec").int(4).since(AC1012)),
    Field(field(272, "dimtdec").int(4).since(AC1012)),
    Field(field(273, "dimaltu").int(2).since(AC1012)),
    Field(field(274, "dimalttd").int(2).since(AC1012)),
    Field(field(275, "dimaunit").since(AC1012)),
    Field(field(280, "dimjust").since(AC1012)),
    Field(field(281, "dimsd1").since(AC1012)),
    Field(field(282, "dimsd2").since(AC1012)),
    Field(field(283, "dimtolj").int(1).since(AC1012)),
    Field(field(284, "dimtzin").since(AC1012)),
    Field(field(285, "dimaltz").since(AC1012)),
    Field(field(286, "dimalttz").since(AC1012)),
    Field(field(287, "dimfit").int(3).since(AC1012)),
    Field(field(288, "dimupt").since(AC1012)),
    Field(field(340, "dimtxsty").since(AC1012)),
    Field(field(371, "dimlwd").int(-2).since(AC1015)),
    Field(field(372, "dimlwe").int(-2).since(AC1015)),
]);

/// Layer
pub static LAYER: RecordSchema = table_record!("LAYER", 5, DxfVersion::OLDEST, "AcDbLayerTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(62, "color").int(7)),
    Field(field(6, "linetype").text("CONTINUOUS")),
    Field(field(290, "plotting").flag(true).since(AC1015)),
    Field(field(370, "lineweight").int(-3).since(AC1015)),
    Field(field(390, "plot_style").since(AC1015)),
    Field(field(347, "material").since(AC1018)),
]);

/// Linetype
///
/// Each dash element contributes one row of the interleaved 49/74/75/340/
/// 46/50/44/45/9 run.
pub static LTYPE: RecordSchema = table_record!("LTYPE", 5, DxfVersion::OLDEST, "AcDbLinetypeTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(3, "description")),
    Field(field(72, "alignment").int(65)),
    Field(field(73, "element_count")),
    Field(field(40, "pattern_length")),
    Field(field(49, "dash_lengths").list()),
    Field(field(74, "element_types").since(AC1012).list()),
    Field(field(75, "shape_numbers").since(AC1012).list()),
    Field(field(340, "element_styles").since(AC1012).list()),
    Field(field(46, "element_scales").since(AC1012).list()),
    Field(field(50, "element_rotations").since(AC1012).list()),
    Field(field(44, "element_x_offsets").since(AC1012).list()),
    Field(field(45, "element_y_offsets").since(AC1012).list()),
    Field(field(9, "element_texts").since(AC1012).list()),
]);

/// Text style
pub static STYLE: RecordSchema = table_record!("STYLE", 5, DxfVersion::OLDEST, "AcDbTextStyleTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(40, "fixed_height")),
    Field(field(41, "width_factor").real(1.0)),
    Field(field(50, "oblique_angle")),
    Field(field(71, "generation_flags")),
    Field(field(42, "last_height").real(0.2)),
    Field(field(3, "font_file").text("txt")),
    Field(field(4, "big_font_file")),
]);

/// User coordinate system
pub static UCS: RecordSchema = table_record!("UCS", 5, DxfVersion::OLDEST, "AcDbUCSTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(10, "origin_x")),
    Field(field(20, "origin_y")),
    Field(field(30, "origin_z")),
    Field(field(11, "x_axis_x").real(1.0)),
    Field(field(21, "x_axis_y")),
    Field(field(31, "x_axis_z")),
    Field(field(12, "y_axis_x")),
    Field(field(22, "y_axis_y").real(1.0)),
    Field(field(32, "y_axis_z")),
    Field(field(79, "orthographic")),
    Field(field(146, "elevation").since(AC1015)),
    Field(field(346, "base_ucs").since(AC1015)),
    Field(field(71, "ortho_types").since(AC1015).list()),
    Field(field(13, "ortho_origins_x").since(AC1015).list()),
    Field(field(23, "ortho_origins_y").since(AC1015).list()),
    Field(field(33, "ortho_origins_z").since(AC1015).list()),
]);

/// Named view
pub static VIEW: RecordSchema = table_record!("VIEW", 5, DxfVersion::OLDEST, "AcDbViewTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(40, "height").real(1.0)),
    Field(field(10, "center_x")),
    Field(field(20, "center_y")),
    Field(field(41, "width").real(1.0)),
    Field(field(11, "direction_x")),
    Field(field(21, "direction_y")),
    Field(field(31, "direction_z").real(1.0)),
    Field(field(12, "target_x")),
    Field(field(22, "target_y")),
    Field(field(32, "target_z")),
    Field(field(42, "lens_length").real(50.0)),
    Field(field(43, "front_clip")),
    Field(field(44, "back_clip")),
    Field(field(50, "twist_angle")),
    Field(field(71, "view_mode")),
    Field(field(281, "render_mode").since(AC1015)),
    Field(field(72, "has_ucs").since(AC1015)),
    Field(field(73, "camera_plottable").since(AC1018)),
    Field(field(110, "ucs_origin_x").since(AC1015)),
    Field(field(120, "ucs_origin_y").since(AC1015)),
    Field(field(130, "ucs_origin_z").since(AC1015)),
    Field(field(111, "ucs_x_axis_x").real(1.0).since(AC1015)),
    Field(field(121, "ucs_x_axis_y").since(AC1015)),
    Field(field(131, "ucs_x_axis_z").since(AC1015)),
    Field(field(112, "ucs_y_axis_x").since(AC1015)),
    Field(field(122, "ucs_y_axis_y").real(1.0).since(AC1015)),
    Field(field(132, "ucs_y_axis_z").since(AC1015)),
    Field(field(79, "ucs_ortho_type").since(AC1015)),
    Field(field(146, "ucs_elevation").since(AC1015)),
    Field(field(345, "ucs").since(AC1015)),
    Field(field(346, "base_ucs").since(AC1015)),
    Field(field(332, "background").since(AC1018)),
    Field(field(348, "visual_style").since(AC1021)),
]);

/// Viewport configuration
pub static VPORT: RecordSchema = table_record!("VPORT", 5, DxfVersion::OLDEST, "AcDbViewportTableRecord", [
    Field(field(2, "name").required()),
    Field(field(70, "flags")),
    Field(field(10, "lower_left_x")),
    Field(field(20, "lower_left_y")),
    Field(field(11, "upper_right_x").real(1.0)),
    Field(field(21, "upper_right_y").real(1.0)),
    Field(field(12, "center_x")),
    Field(field(22, "center_y")),
    Field(field(13, "snap_base_x")),
    Field(field(23, "snap_base_y")),
    Field(field(14, "snap_spacing_x").real(1.0)),
    Field(field(24, "snap_spacing_y").real(1.0)),
    Field(field(15, "grid_spacing_x")),
    Field(field(25, "grid_spacing_y")),
    Field(field(16, "direction_x")),
    Field(field(26, "direction_y")),
    Field(field(36, "direction_z").real(1.0)),
    Field(field(17, "target_x")),
    Field(field(27, "target_y")),
    Field(field(37, "target_z")),
    Field(field(40, "height").real(1.0)),
    Field(field(41, "aspect_ratio").real(1.0)),
    Field(field(42, "lens_length").real(50.0)),
    Field(field(43, "front_clip")),
    Field(field(44, "back_clip")),
    Field(field(50, "snap_rotation")),
    Field(field(51, "twist_angle")),
    Field(field(71, "view_mode")),
    Field(field(72, "circle_zoom").int(1000)),
    Field(field(73, "fast_zoom").int(1)),
    Field(field(74, "ucs_icon").int(3)),
    Field(field(75, "snap_on")),
    Field(field(76, "grid_on")),
    Field(field(77, "snap_style")),
    Field(field(78, "snap_isopair")),
    Field(field(281, "render_mode").since(AC1015)),
    Field(field(65, "ucs_per_viewport").int(1).since(AC1015)),
    Field(field(110, "ucs_origin_x").since(AC1015)),
    Field(field(120, "ucs_origin_y").since(AC1015)),
    Field(field(130, "ucs_origin_z").since(AC1015)),
    Field(field(111, "ucs_x_axis_x").real(1.0).since(AC1015)),
    Field(field(121, "ucs_x_axis_y").since(AC1015)),
    Field(field(131, "ucs_x_axis_z").since(AC1015)),
    Field(field(112, "ucs_y_axis_x").since(AC1015)),
    Field(field(122, "ucs_y_axis_y").real(1.0).since(AC1015)),
    Field(field(132, "ucs_y_axis_z").since(AC1015)),
    Field(field(79, "ucs_ortho_type").since(AC1015)),
    Field(field(146, "ucs_elevation").since(AC1015)),
    Field(field(345, "ucs").since(AC1015)),
    Field(field(346, "base_ucs").since(AC1015)),
]);
