//! Physics shape reconstruction
//!
//! Turns the collision shapes of a physics document into plain triangles:
//! convex hulls through their half-edge faces, meshes through their index
//! lists. Only shapes tagged with the `default` collision group qualify.

pub mod collision;
pub mod collision_filter;
pub mod shape;
pub mod hull;
pub mod mesh;

pub use collision::{Triangle, Edge};
pub use collision_filter::{CollisionFilter, TARGET_COLLISION_GROUP};
pub use shape::{ShapeEntries, ShapeEntry, ShapeKind};
pub use hull::{Hull, HullStats, HullSkip, FaceWalk, MAX_FACE_STEPS};
pub use mesh::{CollisionMesh, MeshStats, MeshSkip};
