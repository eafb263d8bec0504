// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::ValidationError;
use super::options::PassVerifierOptions;
use super::signature;
use crate::store::TrustStore;
use crate::token::{CredentialSubject, CwtToken, VerifiableCredential};
use log::debug;

/// Runs the ordered claim and signature checks over a decoded token.
///
/// Checks fail fast: the first violated rule reports its own error kind
/// and nothing past it runs, so no partially-validated result is ever
/// observable.
pub(super) struct TokenValidator<'a> {
    options: &'a PassVerifierOptions,
    trust_store: &'a TrustStore,
}

impl<'a> TokenValidator<'a> {
    pub fn new(options: &'a PassVerifierOptions, trust_store: &'a TrustStore) -> Self {
        Self {
            options,
            trust_store,
        }
    }

    pub fn validate(&self, token: &CwtToken, reference_time: i64) -> Result<(), ValidationError> {
        // header checks
        let key_id = match token.header.key_id() {
            Some(key_id) if !key_id.is_empty() => key_id,
            _ => return Err(ValidationError::InvalidKeyId),
        };
        match token.header.algorithm() {
            Some(algorithm) if self.options.valid_algorithms.iter().any(|a| a == algorithm) => {}
            _ => return Err(ValidationError::UnsupportedAlgorithm),
        }

        // payload claims
        if token.payload.token_id().is_none() {
            return Err(ValidationError::InvalidTokenId);
        }
        let issuer = match token.payload.issuer() {
            Some(issuer) if self.options.valid_issuers.iter().any(|i| i == issuer) => issuer,
            _ => return Err(ValidationError::InvalidIssuer),
        };

        // validity window; absent bounds widen to the representable extremes
        let not_before = token.payload.not_before().unwrap_or(i64::MIN);
        let expiry = token.payload.expiry().unwrap_or(i64::MAX);
        if not_before > expiry {
            return Err(ValidationError::InvalidDateRange);
        }
        if not_before > reference_time {
            return Err(ValidationError::NotYetValid);
        }
        if expiry < reference_time {
            return Err(ValidationError::Expired);
        }

        self.validate_signature(token, issuer, &key_id)?;

        // credential shape
        let credential = token
            .payload
            .credential()
            .ok_or(ValidationError::MissingCredential)?;
        check_credential(&credential)?;

        debug!("token from {issuer} validated, key id {key_id}");
        Ok(())
    }

    fn validate_signature(
        &self,
        token: &CwtToken,
        issuer: &str,
        key_id: &str,
    ) -> Result<(), ValidationError> {
        // the issuer has already been checked against the allowed list, so
        // a trust document carrying test keys is only reachable when the
        // caller opted into that issuer
        let document = self
            .trust_store
            .find(issuer, key_id)
            .ok_or(ValidationError::InvalidIssuer)?;

        signature::verify(token, document, issuer, key_id)
    }
}

fn check_credential(credential: &VerifiableCredential) -> Result<(), ValidationError> {
    let subject = &credential.credential_subject;

    let has_context = |wanted: &str| credential.context.iter().any(|c| c == wanted);
    if !has_context(VerifiableCredential::BASE_CONTEXT) || !has_context(subject.context()) {
        return Err(ValidationError::InvalidCredentialContext);
    }

    let has_type = |wanted: &str| credential.credential_type.iter().any(|t| t == wanted);
    if !has_type(VerifiableCredential::BASE_CREDENTIAL_TYPE)
        || !has_type(subject.credential_type())
    {
        return Err(ValidationError::InvalidCredentialType);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cbor::{CborMap, CborValue};
    use crate::store::NZCP_TEST_ISSUER;
    use crate::token::{CwtHeader, CwtPayload, PublicCovidPass};

    const REFERENCE_TIME: i64 = 1639345844;

    fn test_options() -> PassVerifierOptions {
        PassVerifierOptions {
            valid_issuers: vec![NZCP_TEST_ISSUER.to_string()],
            ..Default::default()
        }
    }

    fn base_header() -> CborMap {
        let mut claims = CborMap::new();
        claims.insert(CborValue::Integer(1), CborValue::Integer(-7));
        claims.insert(CborValue::Integer(4), CborValue::Bytes(b"key-1".to_vec()));
        claims
    }

    fn base_payload() -> CborMap {
        let mut claims = CborMap::new();
        claims.insert(
            CborValue::Integer(1),
            CborValue::Text(NZCP_TEST_ISSUER.to_string()),
        );
        claims.insert(
            CborValue::Integer(4),
            CborValue::Integer(REFERENCE_TIME + 3600),
        );
        claims.insert(
            CborValue::Integer(5),
            CborValue::Integer(REFERENCE_TIME - 3600),
        );
        claims.insert(CborValue::Integer(7), CborValue::Bytes(vec![0xab; 16]));
        claims
    }

    fn make_token(header: CborMap, payload: CborMap) -> CwtToken {
        CwtToken {
            header: CwtHeader::new(header, Vec::new()),
            payload: CwtPayload::new(payload, Vec::new()),
            signature: Vec::new(),
        }
    }

    fn validate(token: &CwtToken) -> Result<(), ValidationError> {
        let options = test_options();
        TokenValidator::new(&options, TrustStore::well_known()).validate(token, REFERENCE_TIME)
    }

    #[test]
    fn rejects_missing_key_id() {
        let mut header = base_header();
        header.remove(&CborValue::Integer(4));

        let token = make_token(header, base_payload());
        assert_eq!(validate(&token), Err(ValidationError::InvalidKeyId));
    }

    #[test]
    fn rejects_empty_key_id() {
        let mut header = base_header();
        header.insert(CborValue::Integer(4), CborValue::Bytes(Vec::new()));

        let token = make_token(header, base_payload());
        assert_eq!(validate(&token), Err(ValidationError::InvalidKeyId));
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let mut header = base_header();
        // -35 is ES384
        header.insert(CborValue::Integer(1), CborValue::Integer(-35));

        let token = make_token(header, base_payload());
        assert_eq!(validate(&token), Err(ValidationError::UnsupportedAlgorithm));
    }

    #[test]
    fn rejects_named_but_disallowed_algorithm() {
        let mut header = base_header();
        // -44 names SHA512, which the default options do not allow
        header.insert(CborValue::Integer(1), CborValue::Integer(-44));

        let token = make_token(header, base_payload());
        assert_eq!(validate(&token), Err(ValidationError::UnsupportedAlgorithm));
    }

    #[test]
    fn rejects_missing_token_id() {
        let mut payload = base_payload();
        payload.remove(&CborValue::Integer(7));

        let token = make_token(base_header(), payload);
        assert_eq!(validate(&token), Err(ValidationError::InvalidTokenId));
    }

    #[test]
    fn rejects_unlisted_issuer() {
        let mut payload = base_payload();
        payload.insert(
            CborValue::Integer(1),
            CborValue::Text("did:web:attacker.example.com".to_string()),
        );

        let token = make_token(base_header(), payload);
        assert_eq!(validate(&token), Err(ValidationError::InvalidIssuer));
    }

    #[test]
    fn rejects_inverted_date_range() {
        let mut payload = base_payload();
        payload.insert(
            CborValue::Integer(4),
            CborValue::Integer(REFERENCE_TIME - 7200),
        );
        payload.insert(
            CborValue::Integer(5),
            CborValue::Integer(REFERENCE_TIME - 3600),
        );

        let token = make_token(base_header(), payload);
        assert_eq!(validate(&token), Err(ValidationError::InvalidDateRange));
    }

    #[test]
    fn rejects_not_yet_valid_window() {
        let mut payload = base_payload();
        payload.insert(
            CborValue::Integer(5),
            CborValue::Integer(REFERENCE_TIME + 60),
        );

        let token = make_token(base_header(), payload);
        assert_eq!(validate(&token), Err(ValidationError::NotYetValid));
    }

    #[test]
    fn rejects_expired_window() {
        let mut payload = base_payload();
        payload.insert(
            CborValue::Integer(4),
            CborValue::Integer(REFERENCE_TIME - 60),
        );
        payload.insert(
            CborValue::Integer(5),
            CborValue::Integer(REFERENCE_TIME - 7200),
        );

        let token = make_token(base_header(), payload);
        assert_eq!(validate(&token), Err(ValidationError::Expired));
    }

    #[test]
    fn absent_bounds_widen_the_window() {
        let mut payload = base_payload();
        payload.remove(&CborValue::Integer(4));
        payload.remove(&CborValue::Integer(5));

        // time checks pass and validation proceeds to the (empty)
        // signature, which cannot verify
        let token = make_token(base_header(), payload);
        assert_eq!(validate(&token), Err(ValidationError::InvalidSignature));
    }

    #[test]
    fn rejects_unknown_key_id_for_trusted_issuer() {
        let mut header = base_header();
        header.insert(CborValue::Integer(4), CborValue::Bytes(b"key-9".to_vec()));

        let token = make_token(header, base_payload());
        assert_eq!(validate(&token), Err(ValidationError::InvalidIssuer));
    }

    #[test]
    fn credential_shape_checks() {
        let subject = PublicCovidPass {
            given_name: "Jack".to_string(),
            family_name: Some("Sparrow".to_string()),
            date_of_birth: "1960-04-16".to_string(),
        };

        let good = VerifiableCredential {
            version: "1.0.0".to_string(),
            context: vec![
                VerifiableCredential::BASE_CONTEXT.to_string(),
                subject.context().to_string(),
            ],
            credential_type: vec![
                VerifiableCredential::BASE_CREDENTIAL_TYPE.to_string(),
                subject.credential_type().to_string(),
            ],
            credential_subject: subject,
        };
        assert_eq!(check_credential(&good), Ok(()));

        let mut missing_context = good.clone();
        missing_context.context.truncate(1);
        assert_eq!(
            check_credential(&missing_context),
            Err(ValidationError::InvalidCredentialContext)
        );

        let mut missing_type = good.clone();
        missing_type.credential_type.remove(0);
        assert_eq!(
            check_credential(&missing_type),
            Err(ValidationError::InvalidCredentialType)
        );
    }
}
