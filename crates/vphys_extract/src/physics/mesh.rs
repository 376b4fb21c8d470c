//! Triangle mesh extraction
//!
//! Non-convex collision meshes are already triangulated: a vertex array and a
//! flat `i32` index list, three indices per triangle.

use crate::assets::{ByteArrayDecoder, DecodeError, KeyedDocument};
use crate::foundation::math::Vec3;
use crate::physics::collision::Triangle;
use crate::physics::shape::ShapeEntry;

/// Why a mesh entry produced no geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshSkip {
    /// A payload is missing or decodes to nothing
    Empty(&'static str),
    /// A payload is not valid hex
    Malformed(&'static str, DecodeError),
}

/// Per-mesh extraction counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Triangles emitted
    pub triangles: usize,
    /// Index triples dropped for referencing a missing vertex
    pub dropped_triangles: usize,
}

/// A decoded collision mesh
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionMesh {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Vertex index triples
    pub triangles: Vec<[i32; 3]>,
}

impl CollisionMesh {
    /// Create a mesh from decoded arrays
    pub const fn new(vertices: Vec<Vec3>, triangles: Vec<[i32; 3]>) -> Self {
        Self { vertices, triangles }
    }

    /// Decode the mesh stored at `entry` (`m_Mesh.m_Triangles` and `m_Mesh.m_Vertices`)
    pub fn from_document<D: KeyedDocument + ?Sized>(
        document: &D,
        entry: &ShapeEntry,
    ) -> Result<Self, MeshSkip> {
        let triangles_text = document
            .get_value(&entry.field("m_Mesh.m_Triangles"))
            .unwrap_or_default();
        let vertices_text = document
            .get_value(&entry.field("m_Mesh.m_Vertices"))
            .unwrap_or_default();

        let triangles = ByteArrayDecoder::decode_index_triples(triangles_text)
            .map_err(|e| MeshSkip::Malformed("triangles", e))?;
        if triangles.is_empty() {
            return Err(MeshSkip::Empty("triangles"));
        }

        let vertices = ByteArrayDecoder::decode_vec3(vertices_text)
            .map_err(|e| MeshSkip::Malformed("vertices", e))?;
        if vertices.is_empty() {
            return Err(MeshSkip::Empty("vertices"));
        }

        Ok(Self::new(vertices, triangles))
    }

    /// Append every fully in-range triangle to `out`
    pub fn extract(&self, out: &mut Vec<Triangle>) -> MeshStats {
        let mut stats = MeshStats::default();

        for &[a, b, c] in &self.triangles {
            match self.triangle(a, b, c) {
                Some(triangle) => {
                    out.push(triangle);
                    stats.triangles += 1;
                }
                None => stats.dropped_triangles += 1,
            }
        }

        stats
    }

    fn triangle(&self, a: i32, b: i32, c: i32) -> Option<Triangle> {
        let a = usize::try_from(a).ok()?;
        let b = usize::try_from(b).ok()?;
        let c = usize::try_from(c).ok()?;
        Triangle::from_indices(&self.vertices, a, b, c)
    }
}
