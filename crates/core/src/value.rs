//! Secondary index value types
//!
//! A secondary index entry carries exactly one value drawn from a closed set
//! of kinds. Each kind occupies its own logical sub-table, so the kind is
//! part of the sub-table identity and two entries with the same primary id
//! but different kinds never collide.
//!
//! Wire fidelity matters for the non-numeric kinds: a [`Digest256`] is always
//! two little-endian 128-bit words (32 bytes), and an [`ExtFloat`] is an
//! opaque 16-byte extended-precision bit pattern stored and compared bitwise.
//! Neither can be reconstructed from floating-point semantics, so the byte
//! layout is the contract.

use byteorder::{ByteOrder, LittleEndian};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// The closed set of secondary index kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    U64,
    U128,
    Digest256,
    Float64,
    Float80,
}

impl IndexKind {
    /// Wire size in bytes of one value of this kind.
    pub const fn value_size(&self) -> usize {
        match self {
            IndexKind::U64 => 8,
            IndexKind::U128 => 16,
            IndexKind::Digest256 => 32,
            IndexKind::Float64 => 8,
            IndexKind::Float80 => 16,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IndexKind::U64 => "u64",
            IndexKind::U128 => "u128",
            IndexKind::Digest256 => "digest256",
            IndexKind::Float64 => "f64",
            IndexKind::Float80 => "f80",
        };
        f.write_str(label)
    }
}

/// A secondary index value: one variant per [`IndexKind`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndexValue {
    U64(u64),
    U128(u128),
    Digest256(Digest256),
    Float64(f64),
    Float80(ExtFloat),
}

impl IndexValue {
    /// The kind tag of this value.
    pub const fn kind(&self) -> IndexKind {
        match self {
            IndexValue::U64(_) => IndexKind::U64,
            IndexValue::U128(_) => IndexKind::U128,
            IndexValue::Digest256(_) => IndexKind::Digest256,
            IndexValue::Float64(_) => IndexKind::Float64,
            IndexValue::Float80(_) => IndexKind::Float80,
        }
    }
}

/// Error from decoding a fixed-size hex value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("expected {expected} hex characters, got {got}")]
    BadLength { expected: usize, got: usize },

    #[error("invalid hex character '{0}'")]
    InvalidChar(char),
}

fn hex_value(c: u8) -> Result<u8, HexError> {
    match c {
        b'0'..=b'9' => Ok(c - b'0'),
        b'a'..=b'f' => Ok(c - b'a' + 10),
        b'A'..=b'F' => Ok(c - b'A' + 10),
        _ => Err(HexError::InvalidChar(c as char)),
    }
}

fn decode_hex(s: &str, out: &mut [u8]) -> Result<(), HexError> {
    let bytes = s.as_bytes();
    if bytes.len() != out.len() * 2 {
        return Err(HexError::BadLength {
            expected: out.len() * 2,
            got: bytes.len(),
        });
    }
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = (hex_value(bytes[2 * i])? << 4) | hex_value(bytes[2 * i + 1])?;
    }
    Ok(())
}

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

/// A 256-bit digest index value: exactly 32 bytes, addressed as two
/// little-endian 128-bit words on the engine wire.
///
/// Round-trip byte fidelity is a hard requirement — this type never
/// reinterprets or normalizes its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Digest256([u8; 32]);

impl Digest256 {
    pub const WIRE_SIZE: usize = 32;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Digest256(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// The two 128-bit little-endian words the engine wire expects.
    pub fn words(&self) -> [u128; 2] {
        [
            LittleEndian::read_u128(&self.0[..16]),
            LittleEndian::read_u128(&self.0[16..]),
        ]
    }

    /// Rebuild from the two-word wire form.
    pub fn from_words(words: [u128; 2]) -> Self {
        let mut bytes = [0u8; 32];
        LittleEndian::write_u128(&mut bytes[..16], words[0]);
        LittleEndian::write_u128(&mut bytes[16..], words[1]);
        Digest256(bytes)
    }

    /// Parse from 64 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        let mut bytes = [0u8; 32];
        decode_hex(s, &mut bytes)?;
        Ok(Digest256(bytes))
    }
}

impl fmt::Display for Digest256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl From<[u8; 32]> for Digest256 {
    fn from(bytes: [u8; 32]) -> Self {
        Digest256(bytes)
    }
}

impl Serialize for Digest256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Digest256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest256::from_hex(&s).map_err(de::Error::custom)
    }
}

/// An extended-precision float index value.
///
/// Sixteen raw little-endian bytes covering the platform's 80-bit (or wider)
/// long-double layout. The payload is opaque to this layer: values are
/// stored, compared and transported bitwise, never interpreted as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExtFloat([u8; 16]);

impl ExtFloat {
    pub const WIRE_SIZE: usize = 16;

    pub const fn from_le_bytes(bytes: [u8; 16]) -> Self {
        ExtFloat(bytes)
    }

    pub const fn to_le_bytes(&self) -> [u8; 16] {
        self.0
    }

    pub fn from_bits(bits: u128) -> Self {
        let mut bytes = [0u8; 16];
        LittleEndian::write_u128(&mut bytes, bits);
        ExtFloat(bytes)
    }

    pub fn to_bits(&self) -> u128 {
        LittleEndian::read_u128(&self.0)
    }

    /// Parse from 32 hex characters.
    pub fn from_hex(s: &str) -> Result<Self, HexError> {
        let mut bytes = [0u8; 16];
        decode_hex(s, &mut bytes)?;
        Ok(ExtFloat(bytes))
    }
}

impl fmt::Display for ExtFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, &self.0)
    }
}

impl Serialize for ExtFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ExtFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ExtFloat::from_hex(&s).map_err(de::Error::custom)
    }
}
