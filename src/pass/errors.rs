// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

/// Pass verification failure.
///
/// The pass-text kinds are raised by [`PassVerifier`](super::PassVerifier)
/// itself; token-decode and claim-validation failures are wrapped
/// transparently, so callers still see the three error families as
/// distinct variants.  Every kind means "reject the pass"; the
/// granularity exists for diagnostics, not recovery.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The pass is not of the form `<prefix>/<version>/<payload>`.
    #[error("pass payload must be in the form <prefix>/<version>/<payload>")]
    InvalidPassComponents,
    #[error("unexpected pass prefix")]
    InvalidPrefix,
    #[error("unexpected pass version")]
    InvalidVersion,
    #[error("missing pass payload")]
    MissingPayload,
    /// The payload component is not valid base-32.
    #[error("pass payload is not valid base-32")]
    InvalidPayloadEncoding,
    #[error(transparent)]
    Token(#[from] crate::token::Error),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A violated claim or signature check.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The key id field is missing from the header.
    #[error("missing or empty key id")]
    InvalidKeyId,
    /// The algorithm is not in the approved list.
    #[error("unsupported signing algorithm")]
    UnsupportedAlgorithm,
    /// The token id field is missing from the payload.
    #[error("missing token id")]
    InvalidTokenId,
    /// The issuer is not in the approved list, or has no trust document.
    #[error("untrusted issuer")]
    InvalidIssuer,
    /// The not-before time is after the expiry, which indicates a
    /// malformed pass.
    #[error("not-before is after expiry")]
    InvalidDateRange,
    /// The not-before time has not arrived yet.
    #[error("pass is not yet valid")]
    NotYetValid,
    /// The expiry time is in the past.
    #[error("pass has expired")]
    Expired,
    /// The payload does not carry a verifiable credential.
    #[error("missing verifiable credential")]
    MissingCredential,
    /// The credential's context list is missing a required context.
    #[error("invalid credential context")]
    InvalidCredentialContext,
    /// The credential's type list is missing a required type.
    #[error("invalid credential type")]
    InvalidCredentialType,
    /// The issuer's verification key is not a kind we can verify.
    #[error("unsupported verification key type")]
    UnsupportedVerificationKeyType,
    /// The verification key coordinates were missing or undecodable.
    #[error("invalid verification key parameters")]
    InvalidKeyParameters,
    /// The signature does not verify: the data was tampered with or it was
    /// signed with a different key.
    #[error("invalid signature")]
    InvalidSignature,
}
