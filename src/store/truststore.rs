// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::did::DidDocument;
use super::errors::Error;
use log::debug;
use once_cell::sync::Lazy;

/// The production NZCP issuer.
pub const NZCP_ISSUER: &str = "did:web:nzcp.identity.health.nz";

/// The test issuer used by the example passes published on
/// <https://nzcp.covid19.health.nz/>.
pub const NZCP_TEST_ISSUER: &str = "did:web:nzcp.covid19.health.nz";

// did:web resolution would normally fetch https://<host>/.well-known/did.json;
// the ministry's keys have not rotated, so the documents are compiled in.
// Live fetch + caching is a future extension point.
const WELL_KNOWN_DOCUMENTS: &[&str] = &[
    include_str!("../../data/did-web-nzcp-identity-health-nz.json"),
    include_str!("../../data/did-web-nzcp-covid19-health-nz.json"),
];

static WELL_KNOWN: Lazy<TrustStore> = Lazy::new(|| {
    let mut store = TrustStore::new();
    for document in WELL_KNOWN_DOCUMENTS {
        // compiled-in documents, pinned well-formed by tests
        store
            .load_json(document)
            .expect("embedded DID document is well-formed");
    }
    store
});

/// A read-only registry of trusted issuer DID documents.
#[derive(Debug, Default)]
pub struct TrustStore {
    documents: Vec<DidDocument>,
}

impl TrustStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store holding the embedded NZCP issuer documents.
    /// Parsed exactly once on first use, immutable afterwards.
    pub fn well_known() -> &'static TrustStore {
        &WELL_KNOWN
    }

    /// Add the DID document in the given JSON to the store.
    pub fn load_json(&mut self, j: &str) -> Result<(), Error> {
        let document: DidDocument =
            serde_json::from_str(j).map_err(|e| Error::Syntax(e.to_string()))?;

        debug!("loaded DID document for {}", document.id);
        self.documents.push(document);

        Ok(())
    }

    /// Look up the document for the given issuer whose assertion-method
    /// list authorizes the given key.
    pub fn find(&self, issuer: &str, key_id: &str) -> Option<&DidDocument> {
        let assertion_id = format!("{issuer}#{key_id}");
        self.documents
            .iter()
            .find(|doc| doc.id == issuer && doc.assertion_methods.iter().any(|m| *m == assertion_id))
    }
}
