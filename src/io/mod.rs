//! I/O for DXF tag streams

pub mod dxf;

pub use dxf::{DxfReader, DxfWriter};
