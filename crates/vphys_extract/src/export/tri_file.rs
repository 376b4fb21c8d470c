//! Flat triangle buffer (`.tri`) support
//!
//! # Format
//!
//! ```text
//! foreach triangle
//!     REAL32[3] – p1 (x, y, z)
//!     REAL32[3] – p2
//!     REAL32[3] – p3
//! end
//! ```
//!
//! Little-endian, no header, no count, no padding: the triangle count is the
//! file size divided by [`TRIANGLE_SIZE`].

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::physics::Triangle;

/// Size of one triangle in bytes (9 × f32)
pub const TRIANGLE_SIZE: usize = 36;

/// Triangle buffer errors
#[derive(Error, Debug)]
pub enum ExportError {
    /// Output file could not be created or written
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        /// File being written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Input file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Buffer length is not a whole number of triangles
    #[error("Triangle buffer of {len} bytes is not a multiple of {}", TRIANGLE_SIZE)]
    TruncatedFile {
        /// Buffer length in bytes
        len: usize,
    },
}

/// Collects the triangles of one document in processing order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryAggregator {
    triangles: Vec<Triangle>,
}

impl GeometryAggregator {
    /// Create an empty aggregator
    pub const fn new() -> Self {
        Self { triangles: Vec::new() }
    }

    /// Add one triangle
    pub fn push(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Buffer that shape reconstructors append to directly
    pub fn triangles_mut(&mut self) -> &mut Vec<Triangle> {
        &mut self.triangles
    }

    /// Triangles collected so far
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Number of triangles collected
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether nothing was collected
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Serialize all triangles to the flat buffer layout
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.triangles.len() * TRIANGLE_SIZE);
        for triangle in &self.triangles {
            for corner in triangle.corners() {
                bytes.extend_from_slice(&corner.x.to_le_bytes());
                bytes.extend_from_slice(&corner.y.to_le_bytes());
                bytes.extend_from_slice(&corner.z.to_le_bytes());
            }
        }
        bytes
    }

    /// Write the buffer to `path`.
    ///
    /// Nothing is written when no triangles were collected; returns the
    /// number of bytes written otherwise.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<Option<usize>, ExportError> {
        let path = path.as_ref();
        if self.is_empty() {
            return Ok(None);
        }

        let write_error = |source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        };
        let bytes = self.to_bytes();
        let file = File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes).map_err(write_error)?;
        writer.flush().map_err(write_error)?;

        Ok(Some(bytes.len()))
    }
}

impl Extend<Triangle> for GeometryAggregator {
    fn extend<I: IntoIterator<Item = Triangle>>(&mut self, iter: I) {
        self.triangles.extend(iter);
    }
}

/// Decode a flat triangle buffer
pub fn triangles_from_bytes(bytes: &[u8]) -> Result<Vec<Triangle>, ExportError> {
    if bytes.len() % TRIANGLE_SIZE != 0 {
        return Err(ExportError::TruncatedFile { len: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(TRIANGLE_SIZE)
        .map(|raw| {
            Triangle::new(
                read_vertex(&raw[0..12]),
                read_vertex(&raw[12..24]),
                read_vertex(&raw[24..36]),
            )
        })
        .collect())
}

/// Load a `.tri` file back into triangles
pub fn read_tri_file<P: AsRef<Path>>(path: P) -> Result<Vec<Triangle>, ExportError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ExportError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    triangles_from_bytes(&bytes)
}

/// Read a vertex from 12 bytes (3 f32s).
fn read_vertex(buf: &[u8]) -> Vec3 {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 5.0, 6.0),
            Vec3::new(7.0, 8.0, 9.0),
        )
    }

    #[test]
    fn test_layout_is_nine_floats_in_corner_order() {
        let mut aggregator = GeometryAggregator::new();
        aggregator.push(sample_triangle());
        let bytes = aggregator.to_bytes();

        assert_eq!(bytes.len(), TRIANGLE_SIZE);
        let floats: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(floats, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    }

    #[test]
    fn test_first_float_little_endian() {
        let mut aggregator = GeometryAggregator::new();
        aggregator.push(sample_triangle());
        assert_eq!(&aggregator.to_bytes()[0..4], &[0x00_u8, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn test_empty_aggregator_writes_nothing() {
        let path =
            std::env::temp_dir().join(format!("vphys_extract_empty_{}.tri", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let written = GeometryAggregator::new().write_to(&path).unwrap();
        assert_eq!(written, None);
        assert!(!path.exists());
    }

    #[test]
    fn test_write_then_read_back() {
        let path =
            std::env::temp_dir().join(format!("vphys_extract_write_{}.tri", std::process::id()));
        let mut aggregator = GeometryAggregator::new();
        aggregator.extend([sample_triangle(), sample_triangle()]);

        let written = aggregator.write_to(&path).unwrap();
        assert_eq!(written, Some(2 * TRIANGLE_SIZE));
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 72);

        let triangles = read_tri_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(triangles, aggregator.triangles());
    }

    #[test]
    fn test_truncated_buffer_rejected() {
        assert!(matches!(
            triangles_from_bytes(&[0u8; 40]),
            Err(ExportError::TruncatedFile { len: 40 })
        ));
        assert!(triangles_from_bytes(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("vphys_extract_missing_{}", std::process::id()))
            .join("nested")
            .join("out.tri");
        let mut aggregator = GeometryAggregator::new();
        aggregator.push(sample_triangle());
        assert!(matches!(aggregator.write_to(&path), Err(ExportError::Write { .. })));
    }
}
