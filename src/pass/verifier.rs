// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::Error;
use super::options::PassVerifierOptions;
use super::validator::TokenValidator;
use crate::store::TrustStore;
use crate::token::CwtToken;
use base32::Alphabet;
use log::debug;
use std::time::{SystemTime, UNIX_EPOCH};

/// Verifies NZ COVID pass strings end to end: pass-text unwrapping, CWT
/// decoding, claim validation and signature verification.
pub struct PassVerifier<'a> {
    options: PassVerifierOptions,
    trust_store: &'a TrustStore,
}

impl PassVerifier<'static> {
    /// A verifier over the embedded well-known issuer documents.
    pub fn new(options: PassVerifierOptions) -> Self {
        Self {
            options,
            trust_store: TrustStore::well_known(),
        }
    }
}

impl<'a> PassVerifier<'a> {
    /// A verifier over a caller-supplied trust store.
    pub fn with_trust_store(options: PassVerifierOptions, trust_store: &'a TrustStore) -> Self {
        Self {
            options,
            trust_store,
        }
    }

    /// Verify one pass string.
    ///
    /// `reference_time` is the Unix time the validity window is checked
    /// against; pass `None` to use the system clock.  On success the
    /// decoded token is returned so its claims can be displayed; on
    /// failure the first violated check is reported and no token is
    /// returned.
    pub fn verify(
        &self,
        pass_payload: &str,
        reference_time: Option<i64>,
    ) -> Result<CwtToken, Error> {
        let encoded = self.unwrap_pass_text(pass_payload)?;
        let raw = decode_base32(encoded)?;

        let token = CwtToken::decode(&raw)?;
        debug!(
            "decoded CWT, issuer {:?}, key id {:?}",
            token.payload.issuer(),
            token.header.key_id()
        );

        let now = reference_time.unwrap_or_else(unix_now);
        TokenValidator::new(&self.options, self.trust_store).validate(&token, now)?;

        Ok(token)
    }

    /// Split `<prefix>/<version>/<payload>` and check the fixed components.
    fn unwrap_pass_text<'p>(&self, pass_payload: &'p str) -> Result<&'p str, Error> {
        let components: Vec<&str> = pass_payload.split('/').collect();
        if components.len() != 3 {
            return Err(Error::InvalidPassComponents);
        }

        if components[0] != self.options.prefix {
            return Err(Error::InvalidPrefix);
        }
        if components[1] != self.options.version.to_string() {
            return Err(Error::InvalidVersion);
        }
        if components[2].is_empty() {
            return Err(Error::MissingPayload);
        }

        Ok(components[2])
    }
}

/// Decode the RFC 4648 base-32 payload.  Lowercase input is accepted and
/// `=` padding is ignored.
fn decode_base32(payload: &str) -> Result<Vec<u8>, Error> {
    let normalized = payload.trim_end_matches('=').to_ascii_uppercase();
    base32::decode(Alphabet::Rfc4648 { padding: false }, &normalized)
        .ok_or(Error::InvalidPayloadEncoding)
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or(0)
}
