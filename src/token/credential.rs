// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

/// Claims about the subject of a [`VerifiableCredential`].
///
/// Each concrete subject kind contributes the JSON-LD context URI and type
/// name that must appear in the lists of the enclosing credential.
pub trait CredentialSubject {
    fn context(&self) -> &'static str;
    fn credential_type(&self) -> &'static str;
}

/// The NZ COVID pass credential subject,
/// <https://nzcp.covid19.health.nz/#publiccovidpass>.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicCovidPass {
    pub given_name: String,
    pub family_name: Option<String>,
    /// A plain date string such as "1960-04-16".
    pub date_of_birth: String,
}

impl CredentialSubject for PublicCovidPass {
    fn context(&self) -> &'static str {
        "https://nzcp.covid19.health.nz/contexts/v1"
    }

    fn credential_type(&self) -> &'static str {
        "PublicCovidPass"
    }
}

/// A W3C verifiable credential as carried in the CWT `vc` claim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiableCredential {
    pub version: String,
    /// JSON-LD context URIs, in wire order.
    pub context: Vec<String>,
    /// Type names, in wire order.
    pub credential_type: Vec<String>,
    pub credential_subject: PublicCovidPass,
}

impl VerifiableCredential {
    /// The JSON-LD context of the base verifiable credential structure,
    /// <https://www.w3.org/TR/vc-data-model/#contexts>.
    pub const BASE_CONTEXT: &'static str = "https://www.w3.org/2018/credentials/v1";

    /// The type name of the base verifiable credential,
    /// <https://www.w3.org/TR/vc-data-model/#types>.
    pub const BASE_CREDENTIAL_TYPE: &'static str = "VerifiableCredential";
}
