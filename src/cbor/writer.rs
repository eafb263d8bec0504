// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::value::CborValue;

const MT_UNSIGNED: u8 = 0;
const MT_NEGATIVE: u8 = 1;
const MT_BYTES: u8 = 2;
const MT_TEXT: u8 = 3;
const MT_ARRAY: u8 = 4;

/// Serializes CBOR data items into an internal buffer.
///
/// Just enough of an encoder to rebuild the COSE `Sig_structure` during
/// signature verification: integers, byte strings, text strings and
/// arrays.  Maps and tagged values are not supported.
///
/// Encoding is infallible: every representable [`CborValue`] of a
/// supported type has exactly one smallest-count-field encoding, and Rust
/// strings are UTF-8 by construction.
#[derive(Default)]
pub struct CborWriter {
    buffer: Vec<u8>,
}

impl CborWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize one data item to the buffer.
    pub fn write(&mut self, value: &CborValue) {
        match value {
            CborValue::Integer(i) => self.write_integer(*i),
            CborValue::Bytes(b) => {
                self.write_header(MT_BYTES, b.len() as u64);
                self.buffer.extend_from_slice(b);
            }
            CborValue::Text(s) => {
                self.write_header(MT_TEXT, s.len() as u64);
                self.buffer.extend_from_slice(s.as_bytes());
            }
            CborValue::Array(items) => {
                self.write_header(MT_ARRAY, items.len() as u64);
                for item in items {
                    self.write(item);
                }
            }
            CborValue::Map(_) | CborValue::Tagged(_, _) => {
                unimplemented!("map and tag encoding is not needed for signature reconstruction")
            }
        }
    }

    /// The bytes written so far.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }

    fn write_integer(&mut self, i: i64) {
        if i >= 0 {
            self.write_header(MT_UNSIGNED, i as u64);
        } else {
            // major type 1 carries the magnitude -(n)-1
            self.write_header(MT_NEGATIVE, (-(i + 1)) as u64);
        }
    }

    /// Write an item's initial byte and count field, using the smallest
    /// count encoding that fits: inline 0..=23, else a 1/2/4/8-byte
    /// big-endian extension field behind markers 24..=27.
    fn write_header(&mut self, major_type: u8, count: u64) {
        let mt_bits = major_type << 5;
        if count < 24 {
            self.buffer.push(mt_bits | count as u8);
        } else if count <= u64::from(u8::MAX) {
            self.buffer.push(mt_bits | 24);
            self.buffer.push(count as u8);
        } else if count <= u64::from(u16::MAX) {
            self.buffer.push(mt_bits | 25);
            self.buffer.extend_from_slice(&(count as u16).to_be_bytes());
        } else if count <= u64::from(u32::MAX) {
            self.buffer.push(mt_bits | 26);
            self.buffer.extend_from_slice(&(count as u32).to_be_bytes());
        } else {
            self.buffer.push(mt_bits | 27);
            self.buffer.extend_from_slice(&count.to_be_bytes());
        }
    }
}
