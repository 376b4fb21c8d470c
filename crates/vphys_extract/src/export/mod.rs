//! Geometry export

pub mod tri_file;

pub use tri_file::{
    GeometryAggregator, ExportError, read_tri_file, triangles_from_bytes, TRIANGLE_SIZE,
};
