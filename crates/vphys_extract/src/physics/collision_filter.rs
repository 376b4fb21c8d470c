//! Collision group filtering
//!
//! Physics documents list their collision attributes once, and every hull
//! and mesh refers to one of them by index. Only shapes whose attribute
//! carries the `default` collision group are exported.

use std::collections::BTreeSet;

use crate::assets::KeyedDocument;

/// The only collision group that is exported
pub const TARGET_COLLISION_GROUP: &str = "default";

/// Set of collision-attribute indices whose group is [`TARGET_COLLISION_GROUP`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionFilter {
    indices: BTreeSet<i32>,
}

impl CollisionFilter {
    /// Scan `m_collisionAttributes[i].m_CollisionGroupString` for i = 0, 1, ...
    /// until the first missing entry.
    pub fn from_document<D: KeyedDocument + ?Sized>(document: &D) -> Self {
        let mut indices = BTreeSet::new();

        for index in 0_usize.. {
            let path = format!("m_collisionAttributes[{}].m_CollisionGroupString", index);
            let Some(label) = document.get_value(&path) else {
                break;
            };
            let Ok(collision_index) = i32::try_from(index) else {
                break;
            };

            if normalize_collision_group(label) == TARGET_COLLISION_GROUP {
                indices.insert(collision_index);
            } else {
                log::trace!("Collision attribute {} is '{}', not exported", index, label.trim());
            }
        }

        Self { indices }
    }

    /// Build a filter from known indices
    pub fn from_indices(indices: impl IntoIterator<Item = i32>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    /// Whether shapes tagged with `collision_index` are exported
    pub fn contains(&self, collision_index: i32) -> bool {
        self.indices.contains(&collision_index)
    }

    /// Matching indices in ascending order
    pub fn indices(&self) -> impl Iterator<Item = i32> + '_ {
        self.indices.iter().copied()
    }

    /// Number of matching indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// No attribute matched; nothing in the document will be exported
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Normalize a collision group label for comparison.
///
/// Surrounding whitespace is trimmed, one leading quote and the last quote
/// are stripped if present, and the result is lowercased.
pub fn normalize_collision_group(label: &str) -> String {
    let trimmed = label.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|inner| inner.rfind('"').map(|end| &inner[..end]))
        .unwrap_or(trimmed);
    unquoted.to_lowercase()
}
