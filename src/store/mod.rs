// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

//! The trust store: DID documents for the issuers whose passes can be
//! verified, looked up by issuer id and key id.

pub use self::did::{DidDocument, VerificationMethod};
pub use self::errors::Error;
pub use self::truststore::{TrustStore, NZCP_ISSUER, NZCP_TEST_ISSUER};

mod did;
mod errors;
mod truststore;
