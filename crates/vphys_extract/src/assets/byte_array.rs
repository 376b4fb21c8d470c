//! Hex byte-array decoding
//!
//! Binary payloads in KV3 text are written as two-digit hex tokens separated
//! by spaces (`#[ 00 00 80 3f ]`). The physics compiler dumps its arrays in
//! native little-endian layout, so each element is rebuilt from its bytes
//! with `from_le_bytes` instead of reinterpreting the buffer in place.

use thiserror::Error;

use crate::foundation::math::{Vec3, vec3s_from_flat};
use crate::physics::Edge;

/// Byte array decoding errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A token that is not exactly two hex digits
    #[error("Invalid hex token '{token}' at position {position}")]
    InvalidToken {
        /// Zero-based token position in the payload
        position: usize,
        /// The offending token text
        token: String,
    },
}

/// Fixed-width element that can be rebuilt from little-endian bytes
pub trait LeElement: Sized + Copy {
    /// Width of one element in bytes
    const SIZE: usize;

    /// Build one element from exactly `SIZE` bytes
    fn from_le_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_le_element {
    ($($ty:ty),*) => {
        $(
            impl LeElement for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn from_le_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(bytes);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_le_element!(u8, i32, u32, f32);

/// Decoder for hex-pair payloads
pub struct ByteArrayDecoder;

impl ByteArrayDecoder {
    /// Decode the payload into raw bytes.
    ///
    /// The result holds exactly one byte per hex token; separators are not
    /// counted. An empty payload gives an empty vector.
    pub fn decode_bytes(text: &str) -> Result<Vec<u8>, DecodeError> {
        let tokens: Vec<&str> = text.split_ascii_whitespace().collect();
        let mut bytes = Vec::with_capacity(tokens.len());

        for (position, token) in tokens.into_iter().enumerate() {
            bytes.push(Self::parse_token(position, token)?);
        }

        Ok(bytes)
    }

    /// Decode the payload into a sequence of `T`.
    ///
    /// The element count is `byte_count / T::SIZE`. Trailing bytes that do
    /// not fill a whole element are ignored.
    pub fn decode<T: LeElement>(text: &str) -> Result<Vec<T>, DecodeError> {
        let bytes = Self::decode_bytes(text)?;
        let remainder = bytes.len() % T::SIZE;
        if remainder != 0 {
            log::debug!(
                "Ignoring {} trailing byte(s) of a {}-byte element array",
                remainder,
                T::SIZE
            );
        }

        Ok(bytes.chunks_exact(T::SIZE).map(T::from_le_slice).collect())
    }

    /// Decode a packed `f32` position array into vectors
    pub fn decode_vec3(text: &str) -> Result<Vec<Vec3>, DecodeError> {
        let floats = Self::decode::<f32>(text)?;
        Ok(vec3s_from_flat(&floats))
    }

    /// Decode a packed half-edge array (`next, twin, origin, face` bytes)
    pub fn decode_edges(text: &str) -> Result<Vec<Edge>, DecodeError> {
        let bytes = Self::decode_bytes(text)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|raw| Edge::new(raw[0], raw[1], raw[2], raw[3]))
            .collect())
    }

    /// Decode a packed `i32` index array into triples
    pub fn decode_index_triples(text: &str) -> Result<Vec<[i32; 3]>, DecodeError> {
        let indices = Self::decode::<i32>(text)?;
        Ok(indices
            .chunks_exact(3)
            .map(|triple| [triple[0], triple[1], triple[2]])
            .collect())
    }

    fn parse_token(position: usize, token: &str) -> Result<u8, DecodeError> {
        let invalid = || DecodeError::InvalidToken {
            position,
            token: token.to_string(),
        };

        if token.len() != 2 || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        u8::from_str_radix(token, 16).map_err(|_| invalid())
    }
}

/// Encode bytes as space-separated lowercase hex pairs.
///
/// The inverse of [`ByteArrayDecoder::decode_bytes`].
pub fn encode_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Encode `f32` values as a little-endian hex-pair payload
pub fn encode_f32s(values: &[f32]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    encode_bytes(&bytes)
}

/// Encode `i32` values as a little-endian hex-pair payload
pub fn encode_i32s(values: &[i32]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    encode_bytes(&bytes)
}
