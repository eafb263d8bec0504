// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The root CBOR item is not a tag 18 COSE_Sign1 wrapper.
    #[error("not a COSE single signer object")]
    NotCoseSingleSignerObject,
    /// The wrapped item is not the 4-element COSE_Sign1 array, or one of
    /// its header/payload/signature slots has the wrong shape.
    #[error("invalid COSE single signer payload")]
    InvalidCoseSingleSignerPayload,
    /// Malformed CBOR in the envelope, the header or the payload.
    #[error(transparent)]
    Cbor(#[from] crate::cbor::Error),
}
