// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use crate::store::NZCP_ISSUER;
use crate::token::ES256;

/// Configuration for [`PassVerifier`](super::PassVerifier).
///
/// The defaults trust only the production issuer.  To verify the example
/// passes published on <https://nzcp.covid19.health.nz/>, add
/// [`NZCP_TEST_ISSUER`](crate::store::NZCP_TEST_ISSUER) to
/// `valid_issuers`.
#[derive(Clone, Debug)]
pub struct PassVerifierOptions {
    /// Expected first pass component, including the trailing colon.
    pub prefix: String,
    /// Expected second pass component.
    pub version: u32,
    /// Issuers whose passes are accepted.
    pub valid_issuers: Vec<String>,
    /// Algorithm names accepted in the token header.
    pub valid_algorithms: Vec<String>,
}

impl Default for PassVerifierOptions {
    fn default() -> Self {
        Self {
            prefix: "NZCP:".to_string(),
            version: 1,
            valid_issuers: vec![NZCP_ISSUER.to_string()],
            valid_algorithms: vec![ES256.to_string()],
        }
    }
}
