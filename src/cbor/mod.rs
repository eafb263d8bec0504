// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! A minimal CBOR (RFC 8949) codec.
//!
//! This module contains just enough CBOR to decode and verify NZ COVID
//! passes; it is not a complete implementation.  The [`CborReader`] decodes
//! the major types the CWT/COSE structures use (integers, byte strings,
//! text strings, arrays, maps and semantic tags); the [`CborWriter`] only
//! serializes the types needed to rebuild the COSE `Sig_structure` during
//! signature verification.

pub use self::errors::Error;
pub use self::reader::CborReader;
pub use self::value::{CborMap, CborMapExt, CborValue};
pub use self::writer::CborWriter;

mod errors;
mod reader;
mod value;
mod writer;
