//! Shape array enumeration
//!
//! Hull and mesh arrays have no stored length. They are walked index by index
//! until the collision-attribute-index field of the next entry is missing.

use crate::assets::KeyedDocument;

/// Root of the shape data inside a physics document
pub const SHAPE_ROOT: &str = "m_parts[0].m_rnShape";

/// Which shape array to walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Convex hulls (`m_hulls`)
    Hull,
    /// Triangle meshes (`m_meshes`)
    Mesh,
}

impl ShapeKind {
    /// Array field name under [`SHAPE_ROOT`]
    pub const fn array_field(self) -> &'static str {
        match self {
            Self::Hull => "m_hulls",
            Self::Mesh => "m_meshes",
        }
    }
}

/// One entry of a shape array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeEntry {
    /// Position in the array
    pub index: usize,
    /// Key path of the entry, e.g. `m_parts[0].m_rnShape.m_hulls[4]`
    pub path: String,
    /// Parsed collision-attribute index; `None` when the field does not parse.
    /// An entry with an unparsable index never qualifies for export.
    pub collision_index: Option<i32>,
}

impl ShapeEntry {
    /// Key path of a field of this entry
    pub fn field(&self, name: &str) -> String {
        format!("{}.{}", self.path, name)
    }
}

/// Iterator over the entries of one shape array
pub struct ShapeEntries<'d, D: ?Sized> {
    document: &'d D,
    kind: ShapeKind,
    next_index: usize,
}

impl<'d, D: KeyedDocument + ?Sized> ShapeEntries<'d, D> {
    /// Start walking the `kind` array of `document`
    pub const fn new(document: &'d D, kind: ShapeKind) -> Self {
        Self {
            document,
            kind,
            next_index: 0,
        }
    }
}

impl<D: KeyedDocument + ?Sized> Iterator for ShapeEntries<'_, D> {
    type Item = ShapeEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next_index;
        let path = format!("{}.{}[{}]", SHAPE_ROOT, self.kind.array_field(), index);
        let raw = self
            .document
            .get_value(&format!("{}.m_nCollisionAttributeIndex", path))?;

        self.next_index += 1;
        let collision_index = raw.trim().parse::<i32>().ok();
        if collision_index.is_none() {
            log::warn!("{}: unreadable collision attribute index '{}'", path, raw.trim());
        }

        Some(ShapeEntry {
            index,
            path,
            collision_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_walks_until_missing_index_field() {
        let mut doc = HashMap::new();
        doc.insert(
            "m_parts[0].m_rnShape.m_meshes[0].m_nCollisionAttributeIndex".to_string(),
            "3".to_string(),
        );
        doc.insert(
            "m_parts[0].m_rnShape.m_meshes[1].m_nCollisionAttributeIndex".to_string(),
            "x".to_string(),
        );
        doc.insert(
            "m_parts[0].m_rnShape.m_meshes[3].m_nCollisionAttributeIndex".to_string(),
            "0".to_string(),
        );

        let entries: Vec<_> = ShapeEntries::new(&doc, ShapeKind::Mesh).collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].collision_index, Some(3));
        assert_eq!(entries[1].collision_index, None);
        assert_eq!(
            entries[1].field("m_Mesh.m_Vertices"),
            "m_parts[0].m_rnShape.m_meshes[1].m_Mesh.m_Vertices"
        );
    }

    #[test]
    fn test_hull_and_mesh_arrays_are_separate() {
        let mut doc = HashMap::new();
        doc.insert(
            "m_parts[0].m_rnShape.m_hulls[0].m_nCollisionAttributeIndex".to_string(),
            "0".to_string(),
        );

        assert_eq!(ShapeEntries::new(&doc, ShapeKind::Hull).count(), 1);
        assert_eq!(ShapeEntries::new(&doc, ShapeKind::Mesh).count(), 0);
    }
}
