//! Asset loading
//!
//! Everything needed to turn a physics document on disk into queryable data:
//! the KV3 text parser, the path-lookup contract and the hex payload decoder.

pub mod byte_array;
pub mod document;
pub mod kv3;

pub use byte_array::{ByteArrayDecoder, DecodeError, LeElement};
pub use document::KeyedDocument;
pub use kv3::{Kv3Document, Kv3Error, Kv3Value};
