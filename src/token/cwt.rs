// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::claims::{CwtHeader, CwtPayload};
use super::errors::Error;
use crate::cbor::{CborReader, CborValue};
use log::debug;

/// COSE_Sign1 CBOR tag, RFC 9052 §2.
const COSE_SIGN1_TAG: u64 = 18;

/// A decoded CWT security token.
#[derive(Debug)]
pub struct CwtToken {
    /// Protected header: decoded claims plus the original wire bytes.
    pub header: CwtHeader,
    /// Payload: decoded claims plus the original wire bytes.
    pub payload: CwtPayload,
    /// Raw signature bytes, the concatenated R and S halves.
    pub signature: Vec<u8>,
}

impl CwtToken {
    /// Decode a CWT from the raw bytes of a pass payload.
    pub fn decode(data: &[u8]) -> Result<CwtToken, Error> {
        let outer = CborReader::new(data).read()?;

        let inner = match outer {
            CborValue::Tagged(COSE_SIGN1_TAG, inner) => *inner,
            _ => return Err(Error::NotCoseSingleSignerObject),
        };

        let elements = match inner.as_array() {
            Some(elements) if elements.len() == 4 => elements,
            _ => return Err(Error::InvalidCoseSingleSignerPayload),
        };

        // [protected header, unprotected header, payload, signature]; the
        // unprotected header (element 1) plays no part in verification
        let (header_bytes, payload_bytes, signature) = match (
            elements[0].as_bytes(),
            elements[2].as_bytes(),
            elements[3].as_bytes(),
        ) {
            (Some(h), Some(p), Some(s)) => (h, p, s),
            _ => return Err(Error::InvalidCoseSingleSignerPayload),
        };

        // the header and payload are each a CBOR map serialized into a
        // byte string of its own
        let header_claims = match CborReader::new(header_bytes).read()? {
            CborValue::Map(m) => m,
            _ => return Err(Error::InvalidCoseSingleSignerPayload),
        };
        let payload_claims = match CborReader::new(payload_bytes).read()? {
            CborValue::Map(m) => m,
            _ => return Err(Error::InvalidCoseSingleSignerPayload),
        };

        debug!(
            "decoded COSE_Sign1: {} header bytes, {} payload bytes, {} signature bytes",
            header_bytes.len(),
            payload_bytes.len(),
            signature.len()
        );

        Ok(CwtToken {
            header: CwtHeader::new(header_claims, header_bytes.to_vec()),
            payload: CwtPayload::new(payload_claims, payload_bytes.to_vec()),
            signature: signature.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    // the example pass published at https://nzcp.covid19.health.nz/,
    // without its NZCP:/1/ envelope
    const EXAMPLE_TOKEN_B32: &str = "2KCEVIQEIVVWK6JNGEASNICZAEP2KALYDZSGSZB2O5SWEOTOPJRXALTDN53GSZBRHEXGQZLBNR2GQLTOPICRUYMBTIFAIGTUKBAAUYTWMOSGQQDDN5XHIZLYOSBHQJTIOR2HA4Z2F4XXO53XFZ3TGLTPOJTS6MRQGE4C6Y3SMVSGK3TUNFQWY4ZPOYYXQKTIOR2HA4Z2F4XW46TDOAXGG33WNFSDCOJONBSWC3DUNAXG46RPMNXW45DFPB2HGL3WGFTXMZLSONUW63TFGEXDALRQMR2HS4DFQJ2FMZLSNFTGSYLCNRSUG4TFMRSW45DJMFWG6UDVMJWGSY2DN53GSZCQMFZXG4LDOJSWIZLOORUWC3CTOVRGUZLDOSRWSZ3JOZSW4TTBNVSWISTBMNVWUZTBNVUWY6KOMFWWKZ2TOBQXE4TPO5RWI33CNIYTSNRQFUYDILJRGYDVAYFE6VGU4MCDGK7DHLLYWHVPUS2YIDJOA6Y524TD3AZRM263WTY2BE4DPKIF27WKF3UDNNVSVWRDYIYVJ65IRJJJ6Z25M2DO4YZLBHWFQGVQR5ZLIWEQJOZTS3IQ7JTNCFDX";

    fn example_token() -> CwtToken {
        let raw = base32::decode(
            base32::Alphabet::Rfc4648 { padding: false },
            EXAMPLE_TOKEN_B32,
        )
        .unwrap();
        CwtToken::decode(&raw).unwrap()
    }

    #[test]
    fn decodes_example_header() {
        let token = example_token();

        assert_eq!(token.header.key_id().as_deref(), Some("key-1"));
        assert_eq!(token.header.algorithm(), Some("ES256"));
    }

    #[test]
    fn decodes_example_payload() {
        let token = example_token();
        let payload = &token.payload;

        assert_eq!(payload.issuer(), Some("did:web:nzcp.covid19.health.nz"));
        // 2021-11-02T20:05:30Z .. 2031-11-02T20:05:30Z
        assert_eq!(payload.not_before(), Some(1635883530));
        assert_eq!(payload.expiry(), Some(1951416330));
        assert_eq!(
            payload.cti().as_deref(),
            Some("60a4f54d-4e30-4332-be33-ad78b1eafa4b")
        );
        assert_eq!(
            payload.token_id().as_deref(),
            Some("urn:uuid:60a4f54d-4e30-4332-be33-ad78b1eafa4b")
        );
    }

    #[test]
    fn decodes_example_credential() {
        let credential = example_token().payload.credential().unwrap();

        assert_eq!(credential.version, "1.0.0");
        assert_eq!(
            credential.context,
            [
                "https://www.w3.org/2018/credentials/v1",
                "https://nzcp.covid19.health.nz/contexts/v1",
            ]
        );
        assert_eq!(
            credential.credential_type,
            ["VerifiableCredential", "PublicCovidPass"]
        );

        let subject = credential.credential_subject;
        assert_eq!(subject.given_name, "Jack");
        assert_eq!(subject.family_name.as_deref(), Some("Sparrow"));
        assert_eq!(subject.date_of_birth, "1960-04-16");
    }

    #[test]
    fn keeps_the_original_byte_ranges() {
        let raw = base32::decode(
            base32::Alphabet::Rfc4648 { padding: false },
            EXAMPLE_TOKEN_B32,
        )
        .unwrap();
        let token = CwtToken::decode(&raw).unwrap();

        // the header and payload wire bytes must appear verbatim inside
        // the original input
        let find = |needle: &[u8]| {
            raw.windows(needle.len()).any(|window| window == needle)
        };
        assert!(find(token.header.data()));
        assert!(find(token.payload.data()));
        assert!(find(&token.signature));
    }

    #[test]
    fn rejects_untagged_input() {
        // a bare 4-element array, no COSE_Sign1 tag
        let raw = hex!("8441a0a041004100");
        assert_eq!(
            CwtToken::decode(&raw).unwrap_err(),
            Error::NotCoseSingleSignerObject
        );
    }

    #[test]
    fn rejects_wrong_tag() {
        // tag 61 (bare CWT) instead of tag 18
        let raw = hex!("d83d8441a0a041004100");
        assert_eq!(
            CwtToken::decode(&raw).unwrap_err(),
            Error::NotCoseSingleSignerObject
        );
    }

    #[test]
    fn rejects_wrong_arity() {
        // tag 18 over a 3-element array
        let raw = hex!("d28341a0a04100");
        assert_eq!(
            CwtToken::decode(&raw).unwrap_err(),
            Error::InvalidCoseSingleSignerPayload
        );
    }

    #[test]
    fn rejects_non_bytestring_slots() {
        // tag 18, 4 elements, but an integer in the payload slot
        let raw = hex!("d28441a0a0004100");
        assert_eq!(
            CwtToken::decode(&raw).unwrap_err(),
            Error::InvalidCoseSingleSignerPayload
        );
    }

    #[test]
    fn rejects_non_map_header() {
        // the header byte string holds an integer, not a map
        let raw = hex!("d2844100a041a04100");
        assert_eq!(
            CwtToken::decode(&raw).unwrap_err(),
            Error::InvalidCoseSingleSignerPayload
        );
    }

    #[test]
    fn propagates_cbor_errors() {
        assert!(matches!(
            CwtToken::decode(&hex!("1c")),
            Err(Error::Cbor(crate::cbor::Error::MalformedInput))
        ));
        assert!(matches!(
            CwtToken::decode(&[]),
            Err(Error::Cbor(crate::cbor::Error::InputTooShort))
        ));
    }
}
