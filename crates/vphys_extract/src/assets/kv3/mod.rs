//! KV3 text document parser
//!
//! Parses the text encoding of KeyValues3 as written by the physics compiler:
//!
//! ```text
//! <!-- kv3 encoding:text:version{...} format:vphys:version{...} -->
//! {
//!     m_collisionAttributes =
//!     [
//!         { m_CollisionGroupString = "Default" },
//!     ]
//!     m_parts =
//!     [
//!         {
//!             m_rnShape =
//!             {
//!                 m_hulls = [ { m_nCollisionAttributeIndex = 0 m_Hull = { m_Faces = #[ 00 04 ] } } ]
//!             }
//!         },
//!     ]
//! }
//! ```
//!
//! Scalars keep their source text (string quotes included), binary blobs are
//! kept as their hex tokens, and both are reachable by key path through
//! [`KeyedDocument`].

mod cursor;
mod parser;
pub mod path;

use std::str::FromStr;

use thiserror::Error;

use crate::assets::document::KeyedDocument;
use parser::Parser;
use path::{parse_path, PathSegment};

/// KV3 parse errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Kv3Error {
    /// Malformed document text
    #[error("Syntax error at line {line}, column {column}: {message}")]
    Syntax {
        /// 1-based line of the error
        line: usize,
        /// 1-based column of the error
        column: usize,
        /// What went wrong
        message: String,
    },
}

/// A parsed KV3 value
#[derive(Debug, Clone, PartialEq)]
pub enum Kv3Value {
    /// Number, bool, null, string or flagged string, as written in the source
    Scalar(String),
    /// Binary blob as space-separated hex tokens
    Blob(String),
    /// Ordered array
    Array(Vec<Kv3Value>),
    /// Ordered key/value members
    Object(Vec<(String, Kv3Value)>),
}

impl Kv3Value {
    /// Member lookup on an object (first match wins)
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(members) => members.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Element lookup on an array
    pub fn at(&self, index: usize) -> Option<&Self> {
        match self {
            Self::Array(elements) => elements.get(index),
            _ => None,
        }
    }

    /// Textual content of a scalar or blob; containers have none
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Scalar(text) | Self::Blob(text) => Some(text),
            Self::Array(_) | Self::Object(_) => None,
        }
    }

    /// Follow a key path from this value
    pub fn resolve(&self, path: &str) -> Option<&Self> {
        parse_path(path)?
            .into_iter()
            .try_fold(self, |value, segment| match segment {
                PathSegment::Field(name) => value.get(name),
                PathSegment::Index(index) => value.at(index),
            })
    }
}

/// A parsed KV3 document
#[derive(Debug, Clone, PartialEq)]
pub struct Kv3Document {
    root: Kv3Value,
}

impl Kv3Document {
    /// Parse document text
    pub fn parse(text: &str) -> Result<Self, Kv3Error> {
        let root = Parser::new(text).parse_document()?;
        Ok(Self { root })
    }

    /// The root object
    pub const fn root(&self) -> &Kv3Value {
        &self.root
    }
}

impl FromStr for Kv3Document {
    type Err = Kv3Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl KeyedDocument for Kv3Document {
    fn get_value(&self, path: &str) -> Option<&str> {
        self.root.resolve(path)?.as_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<!-- kv3 encoding:text:version{e21c7f3c-8a33-41c5-9977-a76d3a32aa0d} format:vphys:version{1} -->
{
    m_nFlags = 0
    // collision groups
    m_collisionAttributes =
    [
        {
            m_CollisionGroupString = "Default"
            m_InteractAsStrings = [ "Default", "Player" ]
        },
        {
            m_CollisionGroupString = "Debris"
        },
    ]
    /* shape data */
    m_parts =
    [
        {
            m_rnShape =
            {
                m_hulls =
                [
                    {
                        m_nCollisionAttributeIndex = 1
                        m_Hull =
                        {
                            m_flMaxAngularRadius = 12.5
                            m_Faces = #[ 00 04
                                08 ]
                        }
                    },
                ]
            }
            m_material = resource_name:"materials/dev/wall.vmat"
        },
    ]
    "quoted key" = true
    m_note = """
line one
line two
"""
}
"#;

    #[test]
    fn test_parse_sample_document() {
        let doc = Kv3Document::parse(SAMPLE).unwrap();

        assert_eq!(doc.get_value("m_nFlags"), Some("0"));
        assert_eq!(
            doc.get_value("m_collisionAttributes[0].m_CollisionGroupString"),
            Some("\"Default\"")
        );
        assert_eq!(
            doc.get_value("m_collisionAttributes[1].m_CollisionGroupString"),
            Some("\"Debris\"")
        );
        assert_eq!(
            doc.get_value("m_collisionAttributes[0].m_InteractAsStrings[1]"),
            Some("\"Player\"")
        );
        assert_eq!(
            doc.get_value("m_parts[0].m_rnShape.m_hulls[0].m_nCollisionAttributeIndex"),
            Some("1")
        );
        assert_eq!(
            doc.get_value("m_parts[0].m_rnShape.m_hulls[0].m_Hull.m_flMaxAngularRadius"),
            Some("12.5")
        );
        assert_eq!(
            doc.get_value("m_parts[0].m_material"),
            Some("resource_name:\"materials/dev/wall.vmat\"")
        );
        assert_eq!(doc.get_value("quoted key"), Some("true"));
    }

    #[test]
    fn test_blob_tokens_normalized() {
        let doc = Kv3Document::parse(SAMPLE).unwrap();
        assert_eq!(
            doc.get_value("m_parts[0].m_rnShape.m_hulls[0].m_Hull.m_Faces"),
            Some("00 04 08")
        );
    }

    #[test]
    fn test_multiline_string_kept_raw() {
        let doc = Kv3Document::parse(SAMPLE).unwrap();
        let note = doc.get_value("m_note").unwrap();
        assert!(note.starts_with("\"\"\""));
        assert!(note.contains("line two"));
    }

    #[test]
    fn test_missing_paths_and_containers_are_none() {
        let doc = Kv3Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.get_value("m_collisionAttributes[2].m_CollisionGroupString"), None);
        assert_eq!(
            doc.get_value("m_parts[0].m_rnShape.m_hulls[1].m_nCollisionAttributeIndex"),
            None
        );
        assert_eq!(
            doc.get_value("m_parts[0].m_rnShape.m_meshes[0].m_nCollisionAttributeIndex"),
            None
        );
        assert_eq!(doc.get_value("m_collisionAttributes"), None);
        assert_eq!(doc.get_value("m_parts[0].m_rnShape"), None);
        assert_eq!(doc.get_value("m_nFlags[0]"), None);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let doc: Kv3Document = r#"{ name = "say \"hi\"" }"#.parse().unwrap();
        assert_eq!(doc.get_value("name"), Some(r#""say \"hi\"""#));
    }

    #[test]
    fn test_syntax_errors_carry_position() {
        let err = Kv3Document::parse("{\n  key 5\n}").unwrap_err();
        let Kv3Error::Syntax { line, .. } = err;
        assert_eq!(line, 2);

        assert!(Kv3Document::parse("{ a = [ 1, 2 }").is_err());
        assert!(Kv3Document::parse("{ a = #[ 00 01 }").is_err());
        assert!(Kv3Document::parse("{ a = \"open }").is_err());
        assert!(Kv3Document::parse("{ a = 1 } extra").is_err());
        assert!(Kv3Document::parse("a = 1").is_err());
    }

    #[test]
    fn test_runaway_nesting_rejected() {
        let err = Kv3Document::parse(&"[".repeat(100_000)).unwrap_err();
        assert!(matches!(err, Kv3Error::Syntax { .. }));

        let deep = format!("{{ a = {}{} }}", "[".repeat(200_000), "]".repeat(200_000));
        let Kv3Error::Syntax { message, .. } = Kv3Document::parse(&deep).unwrap_err();
        assert_eq!(message, "nesting too deep");
    }

    #[test]
    fn test_nesting_within_bound_parses() {
        let depth = parser::MAX_NESTING_DEPTH - 2;
        let text = format!("{{ a = {}1{} }}", "[".repeat(depth), "]".repeat(depth));
        let doc = Kv3Document::parse(&text).unwrap();
        let path = format!("a{}", "[0]".repeat(depth));
        assert_eq!(doc.get_value(&path), Some("1"));
    }

    #[test]
    fn test_empty_root() {
        let doc = Kv3Document::parse("<!-- kv3 -->\n{\n}\n").unwrap();
        assert_eq!(doc.root(), &Kv3Value::Object(Vec::new()));
    }
}
