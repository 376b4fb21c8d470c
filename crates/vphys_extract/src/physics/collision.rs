//! Collision geometry primitives
//!
//! Plain value types produced by the shape reconstructors. Triangles keep the
//! corner order found in the source data; no winding is enforced.

use crate::foundation::math::Vec3;

/// A collision triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner
    pub p1: Vec3,
    /// Second corner
    pub p2: Vec3,
    /// Third corner
    pub p3: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub const fn new(p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p1, p2, p3 }
    }

    /// Build a triangle from three vertex indices, or `None` if any index is
    /// outside `vertices`
    pub fn from_indices(vertices: &[Vec3], a: usize, b: usize, c: usize) -> Option<Self> {
        Some(Self::new(*vertices.get(a)?, *vertices.get(b)?, *vertices.get(c)?))
    }

    /// Corners in file order
    pub const fn corners(&self) -> [Vec3; 3] {
        [self.p1, self.p2, self.p3]
    }
}

/// A half-edge record as packed by the physics compiler
///
/// Four bytes per edge: `next`, `twin`, `origin`, `face`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// Next half-edge around the same face
    pub next: u8,
    /// Opposite-direction half-edge
    pub twin: u8,
    /// Vertex this half-edge starts at
    pub origin: u8,
    /// Face this half-edge borders
    pub face: u8,
}

impl Edge {
    /// Creates a new half-edge record
    pub const fn new(next: u8, twin: u8, origin: u8, face: u8) -> Self {
        Self { next, twin, origin, face }
    }
}
