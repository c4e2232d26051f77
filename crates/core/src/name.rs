//! Symbolic 64-bit names
//!
//! Accounts, tables and scopes are all identified by a `Name`: an opaque
//! 64-bit scalar with a compact 13-character text form. Names compare by
//! value only; there are no arithmetic semantics.
//!
//! # Text form
//!
//! The text alphabet is `.12345a-z` (32 symbols). The first 12 characters
//! occupy 5 bits each from the most significant end of the word, the 13th
//! character occupies the low 4 bits and is restricted to the first 16
//! symbols. Trailing dots are dropped when rendering, so `"table"` and
//! `"table......."` denote the same value.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Symbol table for the 5-bit text encoding.
const ALPHABET: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Opaque 64-bit symbolic identifier.
///
/// Used for accounts, tables and scopes alike. Treated as an
/// equality-comparable scalar; the numeric value carries no meaning beyond
/// its text form.
///
/// # Examples
///
/// ```
/// use migra_core::Name;
///
/// let table: Name = "accounts".parse().unwrap();
/// assert_eq!(table.to_string(), "accounts");
/// assert!(!table.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Name(u64);

/// Errors from parsing the text form of a [`Name`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameParseError {
    #[error("name is empty")]
    Empty,

    #[error("name '{0}' is longer than 13 characters")]
    TooLong(String),

    #[error("invalid character '{0}' in name (allowed: .12345a-z)")]
    InvalidChar(char),

    #[error("13th character '{0}' out of range (allowed: .12345a-j)")]
    ThirteenthOutOfRange(char),
}

/// Map one text symbol to its 5-bit value.
const fn symbol(c: u8) -> Option<u64> {
    match c {
        b'.' => Some(0),
        b'1'..=b'5' => Some((c - b'1' + 1) as u64),
        b'a'..=b'z' => Some((c - b'a' + 6) as u64),
        _ => None,
    }
}

impl Name {
    /// Construct from a raw 64-bit value.
    pub const fn from_raw(value: u64) -> Self {
        Name(value)
    }

    /// The raw 64-bit value.
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// True for the all-zero name, which renders as the empty string.
    ///
    /// Empty names are syntactically representable but never well-formed
    /// arguments; the operation surface rejects them.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Compile-time name constant from its text form.
    ///
    /// Panics at compile time on invalid input, so misspelled constants are
    /// build errors rather than runtime surprises.
    ///
    /// ```
    /// use migra_core::Name;
    ///
    /// const INJECT: Name = Name::parse_const("inject");
    /// assert_eq!(INJECT, "inject".parse().unwrap());
    /// ```
    pub const fn parse_const(s: &str) -> Self {
        let bytes = s.as_bytes();
        assert!(!bytes.is_empty(), "name is empty");
        assert!(bytes.len() <= 13, "name is longer than 13 characters");
        let mut value: u64 = 0;
        let mut i = 0;
        while i < bytes.len() {
            let sym = match symbol(bytes[i]) {
                Some(sym) => sym,
                None => panic!("invalid character in name"),
            };
            if i < 12 {
                value |= sym << (64 - 5 * (i as u32 + 1));
            } else {
                assert!(sym <= 0x0f, "13th character out of range");
                value |= sym;
            }
            i += 1;
        }
        Name(value)
    }
}

impl FromStr for Name {
    type Err = NameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.is_empty() {
            return Err(NameParseError::Empty);
        }
        if bytes.len() > 13 {
            return Err(NameParseError::TooLong(s.to_string()));
        }
        let mut value: u64 = 0;
        for (i, &c) in bytes.iter().enumerate() {
            let sym = symbol(c).ok_or(NameParseError::InvalidChar(c as char))?;
            if i < 12 {
                value |= sym << (64 - 5 * (i as u32 + 1));
            } else {
                if sym > 0x0f {
                    return Err(NameParseError::ThirteenthOutOfRange(c as char));
                }
                value |= sym;
            }
        }
        Ok(Name(value))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = [b'.'; 13];
        let mut tmp = self.0;
        for i in 0..13 {
            let idx = if i == 0 { tmp & 0x0f } else { tmp & 0x1f };
            buf[12 - i] = ALPHABET[idx as usize];
            tmp >>= if i == 0 { 4 } else { 5 };
        }
        let len = buf
            .iter()
            .rposition(|&c| c != b'.')
            .map(|p| p + 1)
            .unwrap_or(0);
        // Alphabet bytes are ASCII, so the slice is valid UTF-8.
        f.write_str(std::str::from_utf8(&buf[..len]).unwrap_or(""))
    }
}

impl From<u64> for Name {
    fn from(value: u64) -> Self {
        Name(value)
    }
}

impl From<Name> for u64 {
    fn from(name: Name) -> Self {
        name.0
    }
}

// Names travel as their text form in JSON envelopes; raw integers are
// accepted on input for hosts that deal in the scalar directly.
impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

struct NameVisitor;

impl<'de> Visitor<'de> for NameVisitor {
    type Value = Name;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a name string or raw u64")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Name, E> {
        if v.is_empty() {
            return Ok(Name::default());
        }
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Name, E> {
        Ok(Name(v))
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Name, D::Error> {
        deserializer.deserialize_any(NameVisitor)
    }
}
