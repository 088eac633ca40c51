//! ES512 (ECDSA P-521 with SHA-512) through OpenSSL.
//!
//! JWS encodes ECDSA signatures as the fixed-width concatenation
//! `r || s`, each half left-padded to the curve's byte length, while
//! OpenSSL produces and consumes DER. This module converts between them.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use openssl::bn::BigNum;
use openssl::ecdsa::EcdsaSig;
use openssl::hash::MessageDigest;
use openssl::nid::Nid;
use openssl::pkey::{HasParams, PKey, PKeyRef};
use openssl::sign::{Signer, Verifier};

use crate::core::provider::openssl_error;
use crate::error::JwtLensError;

/// Byte length of one P-521 signature component.
const COMPONENT_LEN: usize = 66;

/// Sign `message` with a PEM-encoded P-521 private key.
///
/// Returns the base64url-encoded `r || s` signature.
pub fn sign(message: &[u8], private_pem: &[u8]) -> Result<String, JwtLensError> {
    let pkey = PKey::private_key_from_pem(private_pem)
        .map_err(openssl_error("invalid EC private key"))?;
    ensure_p521(&pkey)?;

    let mut signer =
        Signer::new(MessageDigest::sha512(), &pkey).map_err(openssl_error("ECDSA signing failed"))?;
    signer
        .update(message)
        .map_err(openssl_error("ECDSA signing failed"))?;
    let der = signer
        .sign_to_vec()
        .map_err(openssl_error("ECDSA signing failed"))?;

    let sig = EcdsaSig::from_der(&der).map_err(openssl_error("ECDSA signing failed"))?;
    let mut raw = sig
        .r()
        .to_vec_padded(COMPONENT_LEN as i32)
        .map_err(openssl_error("ECDSA signing failed"))?;
    raw.extend(
        sig.s()
            .to_vec_padded(COMPONENT_LEN as i32)
            .map_err(openssl_error("ECDSA signing failed"))?,
    );

    Ok(URL_SAFE_NO_PAD.encode(raw))
}

/// Verify a base64url `r || s` signature with a PEM-encoded P-521 public key.
///
/// Returns `Ok(false)` for a malformed or mismatching signature and an
/// error only when the key itself is unusable.
pub fn verify(message: &[u8], signature: &str, public_pem: &[u8]) -> Result<bool, JwtLensError> {
    let pkey =
        PKey::public_key_from_pem(public_pem).map_err(openssl_error("invalid EC public key"))?;
    ensure_p521(&pkey)?;

    let Ok(raw) = URL_SAFE_NO_PAD.decode(signature) else {
        return Ok(false);
    };
    if raw.len() != 2 * COMPONENT_LEN {
        tracing::debug!(len = raw.len(), "ES512 signature has wrong length");
        return Ok(false);
    }

    let r = BigNum::from_slice(&raw[..COMPONENT_LEN])
        .map_err(openssl_error("ECDSA verification failed"))?;
    let s = BigNum::from_slice(&raw[COMPONENT_LEN..])
        .map_err(openssl_error("ECDSA verification failed"))?;
    let der = EcdsaSig::from_private_components(r, s)
        .and_then(|sig| sig.to_der())
        .map_err(openssl_error("ECDSA verification failed"))?;

    let mut verifier = Verifier::new(MessageDigest::sha512(), &pkey)
        .map_err(openssl_error("ECDSA verification failed"))?;
    verifier
        .update(message)
        .map_err(openssl_error("ECDSA verification failed"))?;
    // OpenSSL reports a structurally bad signature as an error, which is
    // still just a mismatch from the caller's point of view.
    Ok(verifier.verify(&der).unwrap_or(false))
}

fn ensure_p521<T: HasParams>(pkey: &PKeyRef<T>) -> Result<(), JwtLensError> {
    let curve = pkey
        .ec_key()
        .ok()
        .and_then(|ec| ec.group().curve_name());
    if curve == Some(Nid::SECP521R1) {
        Ok(())
    } else {
        Err(JwtLensError::Provider {
            reason: "ES512 requires a P-521 EC key".to_string(),
        })
    }
}
