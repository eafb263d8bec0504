// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use jsonwebtoken::jwk::Jwk;
use serde::Deserialize;

/// A verification method (public key) listed by a DID document.
#[derive(Clone, Debug, Deserialize)]
pub struct VerificationMethod {
    pub id: String,
    pub controller: String,
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(rename = "publicKeyJwk")]
    pub public_key_jwk: Jwk,
}

/// A Decentralized Identifier document, as described by
/// <https://www.w3.org/TR/did-core/#did-documents>: an identity's public
/// verification keys, plus the subset of them authorized to sign
/// assertions on the identity's behalf.
#[derive(Clone, Debug, Deserialize)]
pub struct DidDocument {
    pub id: String,
    /// "@context" appears both as a single string and as an array in the
    /// wild; both forms are accepted.
    #[serde(rename = "@context", deserialize_with = "one_or_many")]
    pub contexts: Vec<String>,
    #[serde(rename = "verificationMethod")]
    pub verification_methods: Vec<VerificationMethod>,
    #[serde(rename = "assertionMethod")]
    pub assertion_methods: Vec<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(context) => vec![context],
        OneOrMany::Many(contexts) => contexts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::jwk;

    const TEST_DOC: &str = r#"{
        "id": "did:web:example.com",
        "@context": "https://w3.org/ns/did/v1",
        "verificationMethod": [
            {
                "id": "did:web:example.com#key-1",
                "controller": "did:web:example.com",
                "type": "JsonWebKey2020",
                "publicKeyJwk": {
                    "kty": "EC",
                    "crv": "P-256",
                    "x": "zRR-XGsCp12Vvbgui4DD6O6cqmhfPuXMhi1OxPl8760",
                    "y": "Iv5SU6FuW-TRYh5_GOrJlcV_gpF_GpFQhCOD8LSk3T0"
                }
            }
        ],
        "assertionMethod": [ "did:web:example.com#key-1" ]
    }"#;

    #[test]
    fn parses_single_string_context() {
        let doc: DidDocument = serde_json::from_str(TEST_DOC).unwrap();

        assert_eq!(doc.id, "did:web:example.com");
        assert_eq!(doc.contexts, ["https://w3.org/ns/did/v1"]);
        assert_eq!(doc.assertion_methods, ["did:web:example.com#key-1"]);
    }

    #[test]
    fn parses_jwk_as_p256_ec_key() {
        let doc: DidDocument = serde_json::from_str(TEST_DOC).unwrap();

        let method = &doc.verification_methods[0];
        assert_eq!(method.method_type, "JsonWebKey2020");
        match &method.public_key_jwk.algorithm {
            jwk::AlgorithmParameters::EllipticCurve(params) => {
                assert_eq!(params.curve, jwk::EllipticCurve::P256);
            }
            other => panic!("unexpected key parameters: {other:?}"),
        }
    }

    #[test]
    fn parses_array_context() {
        let json = r#"{
            "id": "did:web:example.com",
            "@context": [ "https://w3.org/ns/did/v1", "https://w3id.org/security/suites/jws-2020/v1" ],
            "verificationMethod": [],
            "assertionMethod": []
        }"#;

        let doc: DidDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.contexts.len(), 2);
    }
}
