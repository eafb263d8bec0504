// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::value::{CborMap, CborValue};

// Major types, RFC 8949 §3.1: the top three bits of an item's initial byte.
const MT_UNSIGNED: u8 = 0;
const MT_NEGATIVE: u8 = 1;
const MT_BYTES: u8 = 2;
const MT_TEXT: u8 = 3;
const MT_ARRAY: u8 = 4;
const MT_MAP: u8 = 5;
const MT_TAG: u8 = 6;

/// Decodes CBOR data items from a byte buffer.
///
/// Each call to [`CborReader::read`] decodes exactly one item and advances
/// the cursor past its encoding; nested items decode recursively.  Decoding
/// never reads past the end of the buffer: a declared length that exceeds
/// the remaining input fails with [`Error::InputTooShort`].
pub struct CborReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> CborReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Decode the next data item.
    pub fn read(&mut self) -> Result<CborValue, Error> {
        match self.peek()? >> 5 {
            MT_UNSIGNED => Ok(CborValue::Integer(self.read_integer(false)?)),
            MT_NEGATIVE => Ok(CborValue::Integer(self.read_integer(true)?)),
            MT_BYTES => Ok(CborValue::Bytes(self.read_bytes()?)),
            MT_TEXT => Ok(CborValue::Text(self.read_text()?)),
            MT_ARRAY => Ok(CborValue::Array(self.read_array()?)),
            MT_MAP => Ok(CborValue::Map(self.read_map()?)),
            MT_TAG => self.read_tagged(),
            // major type 7 (floats and simple values) never appears in the
            // pass wire format
            _ => unimplemented!("CBOR major type 7 (special/float) is not supported"),
        }
    }

    fn peek(&self) -> Result<u8, Error> {
        self.data.get(self.pos).copied().ok_or(Error::InputTooShort)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        if self.data.len() - self.pos < n {
            return Err(Error::InputTooShort);
        }
        let taken = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(taken)
    }

    /// Read the count field of the item at the cursor: the low five bits of
    /// the initial byte when 0..=23, otherwise the 1/2/4/8-byte big-endian
    /// extension field selected by markers 24..=27.  Markers 28..=30 are
    /// unassigned, and 31 (indefinite length) is never used here.
    fn read_count(&mut self) -> Result<u64, Error> {
        let short = self.peek()? & 0x1f;
        self.pos += 1;

        let extension = match short {
            0..=23 => return Ok(u64::from(short)),
            24 => 1,
            25 => 2,
            26 => 4,
            27 => 8,
            _ => return Err(Error::MalformedInput),
        };

        let mut count: u64 = 0;
        for byte in self.take(extension)? {
            count = count << 8 | u64::from(*byte);
        }
        Ok(count)
    }

    /// Count fields double as byte lengths and element counts.
    fn read_length(&mut self) -> Result<usize, Error> {
        let count = self.read_count()?;
        usize::try_from(count).map_err(|_| Error::InputTooShort)
    }

    fn read_integer(&mut self, negative: bool) -> Result<i64, Error> {
        let count = self.read_count()?;
        // a magnitude beyond i64 cannot be a claim this protocol defines
        let magnitude = i64::try_from(count).map_err(|_| Error::MalformedInput)?;
        Ok(if negative { -1 - magnitude } else { magnitude })
    }

    fn read_bytes(&mut self) -> Result<Vec<u8>, Error> {
        let len = self.read_length()?;
        Ok(self.take(len)?.to_vec())
    }

    fn read_text(&mut self) -> Result<String, Error> {
        let len = self.read_length()?;
        let raw = self.take(len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| Error::InvalidUtf8)
    }

    fn read_array(&mut self) -> Result<Vec<CborValue>, Error> {
        let len = self.read_length()?;
        // no pre-reserve: the count is attacker-controlled
        let mut items = Vec::new();
        for _ in 0..len {
            items.push(self.read()?);
        }
        Ok(items)
    }

    fn read_map(&mut self) -> Result<CborMap, Error> {
        let len = self.read_length()?;
        let mut map = CborMap::new();
        for _ in 0..len {
            let key = self.read()?;
            let value = self.read()?;
            // a duplicate key overwrites the earlier entry
            map.insert(key, value);
        }
        Ok(map)
    }

    fn read_tagged(&mut self) -> Result<CborValue, Error> {
        let tag = self.read_count()?;
        let inner = self.read()?;
        Ok(CborValue::Tagged(tag, Box::new(inner)))
    }
}
