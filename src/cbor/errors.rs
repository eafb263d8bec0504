// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The input uses an unassigned count marker (28, 29 or 30) or an
    /// indefinite-length encoding, which this protocol never produces.
    #[error("malformed input")]
    MalformedInput,
    /// A declared length or element count runs past the end of the input.
    #[error("input too short")]
    InputTooShort,
    /// A text string is not valid UTF-8.
    #[error("invalid UTF-8 in text string")]
    InvalidUtf8,
}
