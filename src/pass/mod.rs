// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end pass verification: unwrapping the `NZCP:/1/...` pass text,
//! decoding the CWT it carries, and running the ordered claim and
//! signature checks.

pub use self::errors::{Error, ValidationError};
pub use self::options::PassVerifierOptions;
pub use self::verifier::PassVerifier;

mod errors;
mod options;
mod signature;
mod validator;
mod verifier;
