//! Typed action payloads.
//!
//! One serde struct per operation, matching the structured call envelope the
//! external dispatcher hands over. Raw bytes travel base64-encoded; digest
//! and extended-float values travel as hex strings; `u128` values travel as
//! decimal strings (JSON numbers cannot carry them losslessly).

use migra_core::{Digest256, ExtFloat, Name};
use serde::{Deserialize, Serialize};

/// Base64 `data` field codec.
pub(crate) mod bytes_b64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        STANDARD.decode(s.as_bytes()).map_err(serde::de::Error::custom)
    }
}

/// Decimal-string `u128` codec.
pub(crate) mod u128_str {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `inject` — store a primary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inject {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    #[serde(with = "bytes_b64")]
    pub data: Vec<u8>,
}

/// `idxi` — store a `u64` secondary index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdxI {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    pub secondary: u64,
}

/// `idxii` — store a `u128` secondary index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdxIi {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    #[serde(with = "u128_str")]
    pub secondary: u128,
}

/// `idxc` — store a 256-bit digest secondary index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdxC {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    pub secondary: Digest256,
}

/// `idxdbl` — store an `f64` secondary index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdxDbl {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    pub secondary: f64,
}

/// `idxldbl` — store an extended-precision float secondary index entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdxLdbl {
    pub table: Name,
    pub scope: Name,
    pub payer: Name,
    pub id: u64,
    pub secondary: ExtFloat,
}

/// `eject` — remove a primary record. Note the asymmetry with `inject`:
/// an `account` argument, no payer, no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Eject {
    pub account: Name,
    pub table: Name,
    pub scope: Name,
    pub id: u64,
}
