// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! CWT security token decoding: the COSE_Sign1 envelope and the claims it
//! carries.
//!
//! A pass payload is a CWT (CBOR Web Token, RFC 8392) wrapped in a COSE
//! single-signer envelope (RFC 9052).  [`CwtToken::decode`] unwraps the
//! envelope into its protected header, payload and signature; the header
//! and payload are then readable through the typed claim accessors on
//! [`CwtHeader`] and [`CwtPayload`].
//!
//! The original header and payload byte ranges are kept alongside the
//! decoded claim maps: the signature is computed over those exact bytes,
//! so verification echoes them verbatim instead of re-serializing.

pub use self::claims::{CwtHeader, CwtPayload, ES256};
pub use self::credential::{CredentialSubject, PublicCovidPass, VerifiableCredential};
pub use self::cwt::CwtToken;
pub use self::errors::Error;

mod claims;
mod credential;
mod cwt;
mod errors;
