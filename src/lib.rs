// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! NZ COVID Pass decoding and verification.
//!
//! This crate provides an API to decode and verify the digitally signed
//! health-credential tokens ("passes") issued under the NZ COVID Pass
//! specification, <https://nzcp.covid19.health.nz/>.
//!
//! A pass is a CWT (CBOR Web Token) inside a COSE_Sign1 envelope, base-32
//! encoded into a `NZCP:/1/...` string.  Verification covers:
//! * the pass-text shape (prefix, version, payload encoding)
//! * the CWT claims: validity window, trusted issuer, algorithm whitelist
//! * the ECDSA-P256 signature over the derived COSE Sig_structure, using
//!   the issuer's published DID document
//! * the verifiable-credential shape carried in the payload
//!
//! # Example
//!
//! ```no_run
//! use nzcp::pass::{PassVerifier, PassVerifierOptions};
//!
//! let verifier = PassVerifier::new(PassVerifierOptions::default());
//!
//! let token = verifier.verify("NZCP:/1/2KCEVIQEIVVWK6...", None).expect("verifying pass");
//!
//! let credential = token
//!     .payload
//!     .credential()
//!     .expect("validated passes carry a credential");
//! println!("pass holder: {}", credential.credential_subject.given_name);
//! ```

pub mod cbor;
pub mod pass;
pub mod store;
pub mod token;
