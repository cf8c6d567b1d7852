//! Graphical entities (ENTITIES and BLOCKS sections)

use super::SchemaItem::{Field, Handle, Owners};
use super::{field, marker, RecordSchema};
use crate::types::DxfVersion::{AC1012, AC1014, AC1015, AC1018, AC1021};
use crate::types::DxfVersion;

/// Expands to an entity schema: handle, owners, the common `AcDbEntity`
/// fields, then the type's own items.
macro_rules! entity {
    ($type_name:literal, $since:expr, [$($item:expr),* $(,)?]) => {
        RecordSchema {
            type_name: $type_name,
            handle_code: 5,
            since: $since,
            items: &[
                Handle,
                Owners,
                marker("AcDbEntity"),
                Field(field(67, "paper_space")),
                Field(field(8, "layer").text("0")),
                Field(field(6, "linetype").text("BYLAYER")),
                Field(field(347, "material").since(AC1018)),
                Field(field(62, "color").int(256)),
                Field(field(370, "lineweight").int(-1).since(AC1015)),
                Field(field(48, "linetype_scale").real(1.0).since(AC1015)),
                Field(field(60, "invisible").since(AC1015)),
                $($item),*
            ],
        }
    };
}

/// Three-dimensional face
pub static FACE3D: RecordSchema = entity!("3DFACE", DxfVersion::OLDEST, [
    marker("AcDbFace"),
    Field(field(10, "first_x")),
    Field(field(20, "first_y")),
    Field(field(30, "first_z")),
    Field(field(11, "second_x")),
    Field(field(21, "second_y")),
    Field(field(31, "second_z")),
    Field(field(12, "third_x")),
    Field(field(22, "third_y")),
    Field(field(32, "third_z")),
    Field(field(13, "fourth_x")),
    Field(field(23, "fourth_y")),
    Field(field(33, "fourth_z")),
    Field(field(70, "invisible_edges")),
]);

/// Circular arc
pub static ARC: RecordSchema = entity!("ARC", DxfVersion::OLDEST, [
    marker("AcDbCircle"),
    Field(field(39, "thickness")),
    Field(field(10, "center_x")),
    Field(field(20, "center_y")),
    Field(field(30, "center_z")),
    Field(field(40, "radius").real(1.0)),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
    marker("AcDbArc"),
    Field(field(50, "start_angle")),
    Field(field(51, "end_angle").real(360.0)),
]);

/// Attribute definition
pub static ATTDEF: RecordSchema = entity!("ATTDEF", DxfVersion::OLDEST, [
    marker("AcDbText"),
    Field(field(39, "thickness")),
    Field(field(10, "first_x")),
    Field(field(20, "first_y")),
    Field(field(30, "first_z")),
    Field(field(40, "height").real(1.0)),
    Field(field(1, "default_value")),
    Field(field(50, "rotation")),
    Field(field(41, "relative_x_scale").real(1.0)),
    Field(field(51, "oblique_angle")),
    Field(field(7, "style").text("STANDARD")),
    Field(field(71, "generation_flags")),
    Field(field(72, "horizontal_justification")),
    Field(field(11, "second_x")),
    Field(field(21, "second_y")),
    Field(field(31, "second_z")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
    marker("AcDbAttributeDefinition"),
    Field(field(280, "version").since(AC1018)),
    Field(field(3, "prompt")),
    Field(field(2, "tag").required()),
    Field(field(70, "flags")),
    Field(field(73, "field_length")),
    Field(field(74, "vertical_justification")),
]);

/// Circle
pub static CIRCLE: RecordSchema = entity!("CIRCLE", DxfVersion::OLDEST, [
    marker("AcDbCircle"),
    Field(field(39, "thickness")),
    Field(field(10, "center_x")),
    Field(field(20, "center_y")),
    Field(field(30, "center_z")),
    Field(field(40, "radius").real(1.0)),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
]);

/// Ellipse
pub static ELLIPSE: RecordSchema = entity!("ELLIPSE", AC1012, [
    marker("AcDbEllipse"),
    Field(field(10, "center_x")),
    Field(field(20, "center_y")),
    Field(field(30, "center_z")),
    Field(field(11, "major_axis_x").real(1.0)),
    Field(field(21, "major_axis_y")),
    Field(field(31, "major_axis_z")),
    Field(field(210, "extrusion_x")),
    Field(field(220, "extrusion_y")),
    Field(field(230, "extrusion_z").real(1.0)),
    Field(field(40, "ratio").real(1.0)),
    Field(field(41, "start_parameter")),
    Field(field(42, "end_parameter").real(std::f64::consts::TAU)),
]);

/// Raster image reference
///
/// The 14/24 clip boundary vertices form one interleaved run.
pub static IMAGE: RecordSchema = entity!("IMAGE", AC1014, [
    marker("AcDbRasterImage"),
    Field(field(90, "class_version")),
    Field(field(10, "insertion_x")),
    Field(field(20, "insertion_y")),
    Field(field(30, "insertion_z")),
    Field(field(11, "u_vector_x").real(1.0)),
    Field(field(21, "u_vector_y")),
    Field(field(31, "u_vector_z")),
    Field(field(12, "v_vector_x")),
    Field(field(22, "v_vector_y").real(1.0)),
    Field(field(32, "v_vector_z")),
    Field(field(13, "size_u")),
    Field(field(23, "size_v")),
    Field(field(340, "image_def")),
    Field(field(70, "display_properties").int(7)),
    Field(field(280, "clipping")),
    Field(field(281, "brightness").int(50)),
    Field(field(282, "contrast").int(50)),
    Field(field(283, "fade")),
    Field(field(360, "image_def_reactor")),
    Field(field(71, "clip_boundary_type").int(1)),
    Field(field(91, "clip_vertex_count")),
    Field(field(14, "clip_vertices_x").list()),
    Field(field(24, "clip_vertices_y").list()),
]);

/// Block reference
pub static INSERT: RecordSchema = entity!("INSERT", DxfVersion::OLDEST, [
    marker("AcDbBlockReference"),
    Field(field(66, "attributes_follow")),
    Field(field(2, "block_name").required()),
    Field(field(10, "insertion_x")),
    Field(field(20, "insertion_y")),
    Field(field(30, "insertion_z")),
    Field(field(41, "x_scale").real(1.0)),
    Field(field(42, "y_scale").real(1.0)),
    Field(field(43, "z_scale").real(1.0)),
    Field(field(50, "rotation")),
    Field(field(70, "column_count").int(1)),
    Field(field(71, "row_count").int(1)),
    Field(field(44, "column_spacing")),
    Field(field(45, "row_spacing")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
]);

/// Line segment
pub static LINE: RecordSchema = entity!("LINE", DxfVersion::OLDEST, [
    marker("AcDbLine"),
    Field(field(39, "thickness")),
    Field(field(10, "start_x")),
    Field(field(20, "start_y")),
    Field(field(30, "start_z")),
    Field(field(11, "end_x")),
    Field(field(21, "end_y")),
    Field(field(31, "end_z")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
]);

/// Point
pub static POINT: RecordSchema = entity!("POINT", DxfVersion::OLDEST, [
    marker("AcDbPoint"),
    Field(field(10, "location_x")),
    Field(field(20, "location_y")),
    Field(field(30, "location_z")),
    Field(field(39, "thickness")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
    Field(field(50, "x_axis_angle")),
]);

/// Semi-infinite line
pub static RAY: RecordSchema = entity!("RAY", AC1012, [
    marker("AcDbRay"),
    Field(field(10, "start_x")),
    Field(field(20, "start_y")),
    Field(field(30, "start_z")),
    Field(field(11, "direction_x").real(1.0)),
    Field(field(21, "direction_y")),
    Field(field(31, "direction_z")),
]);

/// End of a vertex or attribute sequence
pub static SEQEND: RecordSchema = entity!("SEQEND", DxfVersion::OLDEST, []);

/// Shape reference
pub static SHAPE: RecordSchema = entity!("SHAPE", DxfVersion::OLDEST, [
    marker("AcDbShape"),
    Field(field(39, "thickness")),
    Field(field(10, "insertion_x")),
    Field(field(20, "insertion_y")),
    Field(field(30, "insertion_z")),
    Field(field(40, "size").real(1.0)),
    Field(field(2, "name").required()),
    Field(field(50, "rotation")),
    Field(field(41, "relative_x_scale").real(1.0)),
    Field(field(51, "oblique_angle")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
]);

/// Filled triangle or quadrilateral
pub static SOLID: RecordSchema = entity!("SOLID", DxfVersion::OLDEST, [
    marker("AcDbTrace"),
    Field(field(10, "first_x")),
    Field(field(20, "first_y")),
    Field(field(30, "first_z")),
    Field(field(11, "second_x")),
    Field(field(21, "second_y")),
    Field(field(31, "second_z")),
    Field(field(12, "third_x")),
    Field(field(22, "third_y")),
    Field(field(32, "third_z")),
    Field(field(13, "fourth_x")),
    Field(field(23, "fourth_y")),
    Field(field(33, "fourth_z")),
    Field(field(39, "thickness")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
]);

/// Single-line text
pub static TEXT: RecordSchema = entity!("TEXT", DxfVersion::OLDEST, [
    marker("AcDbText"),
    Field(field(39, "thickness")),
    Field(field(10, "first_x")),
    Field(field(20, "first_y")),
    Field(field(30, "first_z")),
    Field(field(40, "height").real(1.0)),
    Field(field(1, "value").required()),
    Field(field(50, "rotation")),
    Field(field(41, "relative_x_scale").real(1.0)),
    Field(field(51, "oblique_angle")),
    Field(field(7, "style").text("STANDARD")),
    Field(field(71, "generation_flags")),
    Field(field(72, "horizontal_justification")),
    Field(field(11, "second_x")),
    Field(field(21, "second_y")),
    Field(field(31, "second_z")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
    marker("AcDbText"),
    Field(field(73, "vertical_justification")),
]);

/// Wide line segment
pub static TRACE: RecordSchema = entity!("TRACE", DxfVersion::OLDEST, [
    marker("AcDbTrace"),
    Field(field(10, "first_x")),
    Field(field(20, "first_y")),
    Field(field(30, "first_z")),
    Field(field(11, "second_x")),
    Field(field(21, "second_y")),
    Field(field(31, "second_z")),
    Field(field(12, "third_x")),
    Field(field(22, "third_y")),
    Field(field(32, "third_z")),
    Field(field(13, "fourth_x")),
    Field(field(23, "fourth_y")),
    Field(field(33, "fourth_z")),
    Field(field(39, "thickness")),
    Field(field(210, "extrusion_x").since(AC1012)),
    Field(field(220, "extrusion_y").since(AC1012)),
    Field(field(230, "extrusion_z").real(1.0).since(AC1012)),
]);

/// Polyline vertex
pub static VERTEX: RecordSchema = entity!("VERTEX", DxfVersion::OLDEST, [
    marker("AcDbVertex"),
    marker("AcDb2dVertex"),
    Field(field(10, "location_x")),
    Field(field(20, "location_y")),
    Field(field(30, "location_z")),
    Field(field(40, "start_width")),
    Field(field(41, "end_width")),
    Field(field(42, "bulge")),
    Field(field(70, "flags")),
    Field(field(50, "tangent_direction")),
    Field(field(71, "face_index_1")),
    Field(field(72, "face_index_2")),
    Field(field(73, "face_index_3")),
    Field(field(74, "face_index_4")),
    Field(field(91, "identifier").since(AC1021)),
]);

/// Infinite construction line
pub static XLINE: RecordSchema = entity!("XLINE", AC1012, [
    marker("AcDbXline"),
    Field(field(10, "first_x")),
    Field(field(20, "first_y")),
    Field(field(30, "first_z")),
    Field(field(11, "direction_x").real(1.0)),
    Field(field(21, "direction_y")),
    Field(field(31, "direction_z")),
]);
