// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

/// A decoded CBOR map.  Map keys in this protocol are only ever integers
/// and text strings; lookups for the two kinds go through [`CborMapExt`].
pub type CborMap = BTreeMap<CborValue, CborValue>;

/// A decoded CBOR data item.
///
/// Covers the subset of RFC 8949 the pass wire format uses.  Floats and
/// the major type 7 simple values are deliberately absent: the protocol
/// never emits them, so they are unrepresentable rather than half-handled.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CborValue {
    /// Major types 0 and 1.  A 64-bit signed range covers every integer
    /// the protocol carries (claim keys, algorithm codes, timestamps).
    Integer(i64),
    /// Major type 2.
    Bytes(Vec<u8>),
    /// Major type 3, always valid UTF-8.
    Text(String),
    /// Major type 4.
    Array(Vec<CborValue>),
    /// Major type 5.
    Map(CborMap),
    /// Major type 6: a semantic tag number and the single item it wraps.
    Tagged(u64, Box<CborValue>),
}

impl CborValue {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CborValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CborValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CborValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CborValue]> {
        match self {
            CborValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&CborMap> {
        match self {
            CborValue::Map(m) => Some(m),
            _ => None,
        }
    }
}

/// Lookup helpers for the two key kinds the protocol uses.
pub trait CborMapExt {
    fn get_integer_key(&self, key: i64) -> Option<&CborValue>;
    fn get_text_key(&self, key: &str) -> Option<&CborValue>;
}

impl CborMapExt for CborMap {
    fn get_integer_key(&self, key: i64) -> Option<&CborValue> {
        self.get(&CborValue::Integer(key))
    }

    fn get_text_key(&self, key: &str) -> Option<&CborValue> {
        self.get(&CborValue::Text(key.to_string()))
    }
}
