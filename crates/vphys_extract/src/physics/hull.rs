//! Convex hull reconstruction
//!
//! Hulls are stored as a vertex array plus half-edge topology: every face
//! names one of its half-edges, and each half-edge knows the next half-edge
//! around the same face and the vertex it starts at.
//!
//! ```text
//!        v3 ─────── v2
//!        │  e3   e2 │        face start = e0
//!        │          │        e0.next = e1, e1.next = e2, ...
//!        │  e0   e1 │
//!        v0 ─────── v1
//! ```
//!
//! Faces are convex polygons, so each one is fan-triangulated from the origin
//! of its start edge: `(v0, v1, v2)`, `(v0, v2, v3)`, ...
//!
//! Hull data comes straight from disk and may be corrupt. The face walk is
//! bounded and every index is checked, so bad data costs triangles, never the
//! rest of the hull or document.

use crate::assets::{ByteArrayDecoder, DecodeError, KeyedDocument};
use crate::foundation::math::Vec3;
use crate::physics::collision::{Edge, Triangle};
use crate::physics::shape::ShapeEntry;

/// Upper bound on steps taken around a single face
pub const MAX_FACE_STEPS: usize = 100;

/// How a face walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceWalk {
    /// Came back around to the start edge
    Closed,
    /// Hit [`MAX_FACE_STEPS`] without closing
    Overrun,
    /// Reached an edge index outside the edge array
    Broken,
}

/// Per-hull triangulation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HullStats {
    /// Triangles emitted
    pub triangles: usize,
    /// Triangles dropped for an out-of-range vertex index
    pub dropped_triangles: usize,
    /// Faces whose start edge does not exist
    pub skipped_faces: usize,
    /// Faces stopped by the step bound
    pub overrun_faces: usize,
    /// Faces stopped by a bad edge index
    pub broken_faces: usize,
}

/// Why a hull entry produced no geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HullSkip {
    /// A payload is missing or decodes to nothing
    Empty(&'static str),
    /// A payload is not valid hex
    Malformed(&'static str, DecodeError),
}

/// A decoded convex hull
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    /// Vertex positions
    pub vertices: Vec<Vec3>,
    /// Start edge of each face
    pub faces: Vec<u8>,
    /// Half-edge records
    pub edges: Vec<Edge>,
}

impl Hull {
    /// Create a hull from decoded arrays
    pub const fn new(vertices: Vec<Vec3>, faces: Vec<u8>, edges: Vec<Edge>) -> Self {
        Self { vertices, faces, edges }
    }

    /// Decode the hull stored at `entry`.
    ///
    /// Vertices come from `m_Hull.m_VertexPositions`, or `m_Hull.m_Vertices`
    /// when the former is absent or empty.
    pub fn from_document<D: KeyedDocument + ?Sized>(
        document: &D,
        entry: &ShapeEntry,
    ) -> Result<Self, HullSkip> {
        let positions = document
            .get_value(&entry.field("m_Hull.m_VertexPositions"))
            .filter(|text| !text.trim().is_empty())
            .or_else(|| document.get_value(&entry.field("m_Hull.m_Vertices")));

        let vertices = decode_field(positions, "vertices", ByteArrayDecoder::decode_vec3)?;
        let faces = decode_field(
            document.get_value(&entry.field("m_Hull.m_Faces")),
            "faces",
            ByteArrayDecoder::decode::<u8>,
        )?;
        let edges = decode_field(
            document.get_value(&entry.field("m_Hull.m_Edges")),
            "edges",
            ByteArrayDecoder::decode_edges,
        )?;

        Ok(Self::new(vertices, faces, edges))
    }

    /// Triangulate every face, appending to `out`
    pub fn triangulate(&self, out: &mut Vec<Triangle>) -> HullStats {
        let mut stats = HullStats::default();

        for &start_edge in &self.faces {
            if usize::from(start_edge) >= self.edges.len() {
                stats.skipped_faces += 1;
                continue;
            }
            match self.triangulate_face(start_edge, out, &mut stats) {
                FaceWalk::Closed => {}
                FaceWalk::Overrun => stats.overrun_faces += 1,
                FaceWalk::Broken => stats.broken_faces += 1,
            }
        }

        stats
    }

    /// Fan-triangulate the face starting at `start_edge`.
    ///
    /// Emits `(origin(start), origin(edge), origin(next(edge)))` for each
    /// edge after the start until the fan closes, so an intact N-gon yields
    /// N - 2 triangles. A triangle with an out-of-range vertex is dropped
    /// and the walk goes on.
    pub fn triangulate_face(
        &self,
        start_edge: u8,
        out: &mut Vec<Triangle>,
        stats: &mut HullStats,
    ) -> FaceWalk {
        let Some(start) = self.edge(start_edge) else {
            return FaceWalk::Broken;
        };

        let mut edge_index = start.next;
        for _ in 0..MAX_FACE_STEPS {
            if edge_index == start_edge {
                return FaceWalk::Closed;
            }
            let Some(edge) = self.edge(edge_index) else {
                return FaceWalk::Broken;
            };
            if edge.next == start_edge {
                return FaceWalk::Closed;
            }
            let Some(next) = self.edge(edge.next) else {
                return FaceWalk::Broken;
            };

            match Triangle::from_indices(
                &self.vertices,
                usize::from(start.origin),
                usize::from(edge.origin),
                usize::from(next.origin),
            ) {
                Some(triangle) => {
                    out.push(triangle);
                    stats.triangles += 1;
                }
                None => stats.dropped_triangles += 1,
            }

            edge_index = edge.next;
        }

        FaceWalk::Overrun
    }

    fn edge(&self, index: u8) -> Option<Edge> {
        self.edges.get(usize::from(index)).copied()
    }
}

fn decode_field<T>(
    text: Option<&str>,
    what: &'static str,
    decode: impl FnOnce(&str) -> Result<Vec<T>, DecodeError>,
) -> Result<Vec<T>, HullSkip> {
    let values = decode(text.unwrap_or_default()).map_err(|e| HullSkip::Malformed(what, e))?;
    if values.is_empty() {
        return Err(HullSkip::Empty(what));
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad_vertices() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    fn quad_edges() -> Vec<Edge> {
        vec![
            Edge::new(1, 0, 0, 0),
            Edge::new(2, 0, 1, 0),
            Edge::new(3, 0, 2, 0),
            Edge::new(0, 0, 3, 0),
        ]
    }

    #[test]
    fn test_quad_face_yields_two_triangles_sharing_anchor() {
        let hull = Hull::new(quad_vertices(), vec![0], quad_edges());
        let mut triangles = Vec::new();
        let stats = hull.triangulate(&mut triangles);

        assert_eq!(triangles.len(), 2);
        assert_eq!(stats.triangles, 2);
        for triangle in &triangles {
            assert_eq!(triangle.p1, Vec3::new(0.0, 0.0, 0.0));
        }
        assert_eq!(triangles[0].p2, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(triangles[0].p3, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(triangles[1].p2, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(triangles[1].p3, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_face_anchored_mid_loop() {
        let hull = Hull::new(quad_vertices(), vec![2], quad_edges());
        let mut triangles = Vec::new();
        hull.triangulate(&mut triangles);

        assert_eq!(triangles.len(), 2);
        assert!(triangles.iter().all(|t| t.p1 == Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_tetrahedron_has_four_triangles() {
        let vertices = vec![Vec3::zeros(), Vec3::x(), Vec3::y(), Vec3::z()];
        // faces: (0,1,2) edges 0..3, (0,3,1) edges 3..6, (1,3,2) edges 6..9, (0,2,3) edges 9..12
        let mut edges = Vec::new();
        for (face, corners) in [[0u8, 1, 2], [0, 3, 1], [1, 3, 2], [0, 2, 3]].iter().enumerate() {
            let base = u8::try_from(face * 3).unwrap();
            for (i, &origin) in corners.iter().enumerate() {
                let next = base + u8::try_from((i + 1) % 3).unwrap();
                edges.push(Edge::new(next, 0, origin, u8::try_from(face).unwrap()));
            }
        }
        let hull = Hull::new(vertices, vec![0, 3, 6, 9], edges);
        let mut triangles = Vec::new();
        let stats = hull.triangulate(&mut triangles);

        assert_eq!(triangles.len(), 4);
        assert_eq!(stats.overrun_faces + stats.broken_faces + stats.skipped_faces, 0);
    }

    #[test]
    fn test_out_of_range_origin_drops_only_that_triangle() {
        let mut edges = quad_edges();
        edges[2].origin = 9;
        let hull = Hull::new(quad_vertices(), vec![0], edges);
        let mut triangles = Vec::new();
        let stats = hull.triangulate(&mut triangles);

        // both fan triangles touch edge 2's origin
        assert_eq!(triangles.len(), 0);
        assert_eq!(stats.dropped_triangles, 2);

        let mut edges = quad_edges();
        edges[3].origin = 200;
        let hull = Hull::new(quad_vertices(), vec![0], edges);
        let mut triangles = Vec::new();
        let stats = hull.triangulate(&mut triangles);
        assert_eq!(triangles.len(), 1);
        assert_eq!(stats.dropped_triangles, 1);
    }

    #[test]
    fn test_start_edge_out_of_range_skips_face() {
        let hull = Hull::new(quad_vertices(), vec![7, 0], quad_edges());
        let mut triangles = Vec::new();
        let stats = hull.triangulate(&mut triangles);

        assert_eq!(stats.skipped_faces, 1);
        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn test_broken_next_pointer_stops_face() {
        let mut edges = quad_edges();
        edges[2].next = 40;
        let hull = Hull::new(quad_vertices(), vec![0], edges);
        let mut triangles = Vec::new();
        let stats = hull.triangulate(&mut triangles);

        assert_eq!(triangles.len(), 1);
        assert_eq!(stats.broken_faces, 1);
    }

    #[test]
    fn test_cycle_that_skips_start_terminates() {
        // 0 -> 1 -> 2 -> 1 -> 2 ... never returns to edge 0
        let edges = vec![Edge::new(1, 0, 0, 0), Edge::new(2, 0, 1, 0), Edge::new(1, 0, 2, 0)];
        let vertices = vec![Vec3::zeros(), Vec3::x(), Vec3::y()];
        let hull = Hull::new(vertices, vec![0], edges);
        let mut triangles = Vec::new();
        let mut stats = HullStats::default();

        let walk = hull.triangulate_face(0, &mut triangles, &mut stats);
        assert_eq!(walk, FaceWalk::Overrun);
        assert!(triangles.len() <= MAX_FACE_STEPS);
    }

    #[test]
    fn test_self_loop_face_is_empty() {
        let edges = vec![Edge::new(0, 0, 0, 0)];
        let hull = Hull::new(vec![Vec3::zeros()], vec![0], edges);
        let mut triangles = Vec::new();
        let stats = hull.triangulate(&mut triangles);
        assert!(triangles.is_empty());
        assert_eq!(stats, HullStats::default());
    }
}
