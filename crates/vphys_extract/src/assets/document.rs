//! Path-addressed document access
//!
//! The extractor only ever asks a document one question: what text is stored
//! at a given key path. Paths use `.field` for member access and `[i]` for
//! zero-based array indexing, e.g. `m_parts[0].m_rnShape.m_hulls[3].m_Hull.m_Faces`.

use std::collections::{BTreeMap, HashMap};

/// A hierarchical document that can be queried by key path
pub trait KeyedDocument {
    /// Raw text stored at `path`, or `None` if the path does not resolve.
    ///
    /// `None` is how enumeration loops detect the end of an array.
    fn get_value(&self, path: &str) -> Option<&str>;
}

impl<D: KeyedDocument + ?Sized> KeyedDocument for &D {
    fn get_value(&self, path: &str) -> Option<&str> {
        (**self).get_value(path)
    }
}

/// Flat map from full key path to value text
impl KeyedDocument for HashMap<String, String> {
    fn get_value(&self, path: &str) -> Option<&str> {
        self.get(path).map(String::as_str)
    }
}

/// Flat map from full key path to value text
impl KeyedDocument for BTreeMap<String, String> {
    fn get_value(&self, path: &str) -> Option<&str> {
        self.get(path).map(String::as_str)
    }
}
