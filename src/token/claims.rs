// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::credential::{PublicCovidPass, VerifiableCredential};
use crate::cbor::{CborMap, CborMapExt};

// Protected header claim keys, RFC 9052 §3.1
const HEADER_ALGORITHM: i64 = 1;
const HEADER_KEY_ID: i64 = 4;

// Payload claim keys, RFC 8392 §4; the verifiable credential rides in a
// private text-keyed claim
const PAYLOAD_ISSUER: i64 = 1;
const PAYLOAD_EXPIRY: i64 = 4;
const PAYLOAD_NOT_BEFORE: i64 = 5;
const PAYLOAD_CWT_ID: i64 = 7;
const PAYLOAD_VC: &str = "vc";

/// Name of the ECDSA-P256/SHA-256 COSE algorithm (code -7), the one
/// algorithm trusted by default.
pub const ES256: &str = "ES256";

/// Translate a COSE algorithm code into the name used in the caller's
/// allowed-algorithm list; codes outside the fixed table map to `None`.
fn algorithm_name(code: i64) -> Option<&'static str> {
    match code {
        -7 => Some(ES256),
        -16 => Some("SHA256"),
        -44 => Some("SHA512"),
        _ => None,
    }
}

/// The protected header of a [`CwtToken`](super::CwtToken).
///
/// Claims are read lazily out of the decoded map; missing or ill-typed
/// claims surface as `None` and are judged by the validator.
#[derive(Debug)]
pub struct CwtHeader {
    claims: CborMap,
    data: Vec<u8>,
}

impl CwtHeader {
    pub(crate) fn new(claims: CborMap, data: Vec<u8>) -> Self {
        Self { claims, data }
    }

    /// The header's original wire bytes, exactly as signed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Key id: a byte string carrying UTF-8 text.
    pub fn key_id(&self) -> Option<String> {
        let raw = self.claims.get_integer_key(HEADER_KEY_ID)?.as_bytes()?;
        String::from_utf8(raw.to_vec()).ok()
    }

    /// Signing algorithm name, translated from the numeric wire code.
    pub fn algorithm(&self) -> Option<&'static str> {
        let code = self.claims.get_integer_key(HEADER_ALGORITHM)?.as_integer()?;
        algorithm_name(code)
    }
}

/// The payload of a [`CwtToken`](super::CwtToken).
#[derive(Debug)]
pub struct CwtPayload {
    claims: CborMap,
    data: Vec<u8>,
}

impl CwtPayload {
    pub(crate) fn new(claims: CborMap, data: Vec<u8>) -> Self {
        Self { claims, data }
    }

    /// The payload's original wire bytes, exactly as signed.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn issuer(&self) -> Option<&str> {
        self.claims.get_integer_key(PAYLOAD_ISSUER)?.as_text()
    }

    /// Expiry, Unix seconds.
    pub fn expiry(&self) -> Option<i64> {
        self.claims.get_integer_key(PAYLOAD_EXPIRY)?.as_integer()
    }

    /// Not-before, Unix seconds.
    pub fn not_before(&self) -> Option<i64> {
        self.claims.get_integer_key(PAYLOAD_NOT_BEFORE)?.as_integer()
    }

    /// CWT id: a 16-byte binary UUID, rendered in the RFC 4122 lowercase
    /// hyphenated form.
    pub fn cti(&self) -> Option<String> {
        let raw = self.claims.get_integer_key(PAYLOAD_CWT_ID)?.as_bytes()?;
        if raw.len() != 16 {
            return None;
        }
        Some(format!(
            "{}-{}-{}-{}-{}",
            hex::encode(&raw[0..4]),
            hex::encode(&raw[4..6]),
            hex::encode(&raw[6..8]),
            hex::encode(&raw[8..10]),
            hex::encode(&raw[10..16]),
        ))
    }

    /// Token id: the CWT id as a `urn:uuid:` URN.
    pub fn token_id(&self) -> Option<String> {
        self.cti().map(|uuid| format!("urn:uuid:{uuid}"))
    }

    /// The verifiable credential carried in the `vc` claim, or `None` when
    /// the claim is absent or structurally malformed.
    pub fn credential(&self) -> Option<VerifiableCredential> {
        let vc = self.claims.get_text_key(PAYLOAD_VC)?.as_map()?;

        let version = vc.get_text_key("version")?.as_text()?.to_string();

        let context: Vec<String> = vc
            .get_text_key("@context")?
            .as_array()?
            .iter()
            .filter_map(|c| c.as_text().map(str::to_string))
            .collect();

        let credential_type: Vec<String> = vc
            .get_text_key("type")?
            .as_array()?
            .iter()
            .filter_map(|t| t.as_text().map(str::to_string))
            .collect();

        let subject = vc.get_text_key("credentialSubject")?.as_map()?;
        let given_name = subject.get_text_key("givenName")?.as_text()?.to_string();
        let family_name = subject
            .get_text_key("familyName")
            .and_then(|v| v.as_text())
            .map(str::to_string);
        let date_of_birth = subject.get_text_key("dob")?.as_text()?.to_string();

        Some(VerifiableCredential {
            version,
            context,
            credential_type,
            credential_subject: PublicCovidPass {
                given_name,
                family_name,
                date_of_birth,
            },
        })
    }
}
