// Copyright 2024 Contributors to the Veraison project.
// SPDX-License-Identifier: Apache-2.0

use super::errors::ValidationError;
use crate::cbor::{CborValue, CborWriter};
use crate::store::DidDocument;
use crate::token::CwtToken;
use base64::{engine::general_purpose, Engine as _};
use jsonwebtoken::jwk;
use openssl::bn::BigNumContext;
use openssl::ec::{EcGroup, EcKey, EcPoint};
use openssl::ecdsa::EcdsaSig;
use openssl::error::ErrorStack;
use openssl::hash::{hash, MessageDigest};
use openssl::nid::Nid;
use openssl::pkey::Public;

/// Width in bytes of a P-256 coordinate, and of each of the R and S halves
/// of a raw ECDSA signature over the curve.
const COORDINATE_LEN: usize = 32;

/// Verify the token's COSE_Sign1 signature against the issuer's DID
/// document.
pub(super) fn verify(
    token: &CwtToken,
    document: &DidDocument,
    issuer: &str,
    key_id: &str,
) -> Result<(), ValidationError> {
    let method_id = format!("{issuer}#{key_id}");

    // the one supported verification key kind is an EC key on P-256
    let ec_params = document
        .verification_methods
        .iter()
        .filter(|method| method.id == method_id)
        .find_map(|method| match &method.public_key_jwk.algorithm {
            jwk::AlgorithmParameters::EllipticCurve(params)
                if params.curve == jwk::EllipticCurve::P256 =>
            {
                Some(params)
            }
            _ => None,
        })
        .ok_or(ValidationError::UnsupportedVerificationKeyType)?;

    let x = decode_base64url(&ec_params.x)?;
    let y = decode_base64url(&ec_params.y)?;

    let public_key =
        reconstruct_public_key(&x, &y).map_err(|_| ValidationError::InvalidKeyParameters)?;

    // the signature is not computed over the raw token bytes but over the
    // derived Sig_structure of RFC 9052 §4.4, with the original header and
    // payload byte ranges echoed verbatim and no external associated data
    let mut writer = CborWriter::new();
    writer.write(&CborValue::Array(vec![
        CborValue::Text("Signature1".to_string()),
        CborValue::Bytes(token.header.data().to_vec()),
        CborValue::Bytes(Vec::new()),
        CborValue::Bytes(token.payload.data().to_vec()),
    ]));

    let verified = verify_ecdsa(&token.signature, &writer.into_bytes(), &public_key)
        .map_err(|_| ValidationError::InvalidSignature)?;
    if !verified {
        return Err(ValidationError::InvalidSignature);
    }

    Ok(())
}

fn decode_base64url(coordinate: &str) -> Result<Vec<u8>, ValidationError> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(coordinate)
        .map_err(|_| ValidationError::InvalidKeyParameters)
}

/// Reassemble an EC public key from its affine coordinates: an
/// uncompressed point is the 0x04 marker followed by x and y.
fn reconstruct_public_key(x: &[u8], y: &[u8]) -> Result<EcKey<Public>, ErrorStack> {
    let mut encoded_point = Vec::with_capacity(1 + x.len() + y.len());
    encoded_point.push(0x04);
    encoded_point.extend_from_slice(x);
    encoded_point.extend_from_slice(y);

    let group = EcGroup::from_curve_name(Nid::X9_62_PRIME256V1)?;
    let mut ctx = BigNumContext::new()?;
    let point = EcPoint::from_bytes(&group, &encoded_point, &mut ctx)?;

    EcKey::from_public_key(&group, &point)
}

fn verify_ecdsa(
    raw_signature: &[u8],
    data: &[u8],
    public_key: &EcKey<Public>,
) -> Result<bool, ErrorStack> {
    let digest = hash(MessageDigest::sha256(), data)?;

    let der = match raw_signature_to_der(raw_signature) {
        Some(der) => der,
        None => return Ok(false),
    };
    let signature = match EcdsaSig::from_der(&der) {
        Ok(signature) => signature,
        Err(_) => return Ok(false),
    };

    signature.verify(&digest, public_key)
}

/// Convert a raw `R || S` signature (each half a fixed-width big-endian
/// integer) into the DER ECDSA-Sig-Value openssl expects: a SEQUENCE of
/// two minimal-length signed INTEGERs.
fn raw_signature_to_der(raw: &[u8]) -> Option<Vec<u8>> {
    if raw.len() < COORDINATE_LEN {
        return None;
    }
    let (r, s) = raw.split_at(raw.len() - COORDINATE_LEN);

    let r = der_integer(r);
    let s = der_integer(s);

    // P-256 integers stay far below the 128-byte long-form threshold
    let mut der = Vec::with_capacity(2 + r.len() + s.len());
    der.push(0x30);
    der.push((r.len() + s.len()) as u8);
    der.extend_from_slice(&r);
    der.extend_from_slice(&s);
    Some(der)
}

/// DER INTEGER with minimal-length content: superfluous leading zero bytes
/// are stripped, and one zero byte is prepended when the top bit would
/// otherwise read as a sign bit.
fn der_integer(data: &[u8]) -> Vec<u8> {
    let mut content = data;
    while content.len() > 1 && content[0] == 0x00 {
        content = &content[1..];
    }

    let mut out = Vec::with_capacity(content.len() + 3);
    out.push(0x02);
    if content.is_empty() {
        out.push(1);
        out.push(0x00);
    } else if content[0] & 0x80 != 0 {
        out.push((content.len() + 1) as u8);
        out.push(0x00);
        out.extend_from_slice(content);
    } else {
        out.push(content.len() as u8);
        out.extend_from_slice(content);
    }
    out
}
