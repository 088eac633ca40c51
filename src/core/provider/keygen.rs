//! Key pair and secret generation.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use openssl::ec::{EcGroup, EcKey};
use openssl::nid::Nid;
use openssl::pkey::{PKey, Private};
use openssl::rsa::Rsa;
use zeroize::Zeroizing;

use crate::core::algorithm::{AlgorithmFamily, DEFAULT_RSA_BITS, JwsAlgorithm, SUPPORTED_RSA_BITS};
use crate::core::provider::openssl_error;
use crate::error::JwtLensError;

/// A freshly generated PEM key pair.
pub struct KeyPair {
    /// SPKI `PUBLIC KEY` PEM.
    pub public_pem: String,
    /// PKCS#8 `PRIVATE KEY` PEM.
    pub private_pem: Zeroizing<String>,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_pem", &self.public_pem)
            .field("private_pem", &"[REDACTED]")
            .finish()
    }
}

/// Generate an RSA or EC key pair for `algorithm`.
///
/// `rsa_bits` is only consulted for RSA algorithms and defaults to
/// [`DEFAULT_RSA_BITS`].
///
/// # Errors
///
/// Returns [`JwtLensError::KeyMismatch`] for HMAC algorithms, a provider
/// error for an unsupported modulus size or an OpenSSL failure.
pub fn generate_key_pair(
    algorithm: JwsAlgorithm,
    rsa_bits: Option<u32>,
) -> Result<KeyPair, JwtLensError> {
    let pkey = match algorithm.family() {
        AlgorithmFamily::Hmac => {
            return Err(JwtLensError::KeyMismatch {
                algorithm: algorithm.to_string(),
                expected: "a shared secret, not a key pair",
            });
        }
        AlgorithmFamily::Rsa => generate_rsa(rsa_bits.unwrap_or(DEFAULT_RSA_BITS))?,
        AlgorithmFamily::Ec => generate_ec(algorithm)?,
    };

    let private_pem = pkey
        .private_key_to_pem_pkcs8()
        .map_err(openssl_error("failed to export private key"))?;
    let public_pem = pkey
        .public_key_to_pem()
        .map_err(openssl_error("failed to export public key"))?;

    tracing::debug!(%algorithm, "generated key pair");
    Ok(KeyPair {
        public_pem: pem_to_string(public_pem)?,
        private_pem: Zeroizing::new(pem_to_string(private_pem)?),
    })
}

fn generate_rsa(bits: u32) -> Result<PKey<Private>, JwtLensError> {
    if !SUPPORTED_RSA_BITS.contains(&bits) {
        return Err(JwtLensError::Provider {
            reason: format!("unsupported RSA key size {bits} (use 2048, 3072, or 4096)"),
        });
    }
    let rsa = Rsa::generate(bits).map_err(openssl_error("RSA key generation failed"))?;
    PKey::from_rsa(rsa).map_err(openssl_error("RSA key generation failed"))
}

fn generate_ec(algorithm: JwsAlgorithm) -> Result<PKey<Private>, JwtLensError> {
    let nid = match algorithm {
        JwsAlgorithm::ES256 => Nid::X9_62_PRIME256V1,
        JwsAlgorithm::ES384 => Nid::SECP384R1,
        _ => Nid::SECP521R1,
    };
    tracing::debug!(curve = algorithm.curve_name(), "generating EC key");
    let group = EcGroup::from_curve_name(nid).map_err(openssl_error("EC key generation failed"))?;
    let ec = EcKey::generate(&group).map_err(openssl_error("EC key generation failed"))?;
    PKey::from_ec_key(ec).map_err(openssl_error("EC key generation failed"))
}

fn pem_to_string(pem: Vec<u8>) -> Result<String, JwtLensError> {
    String::from_utf8(pem).map_err(|_| JwtLensError::Provider {
        reason: "exported key is not valid PEM text".to_string(),
    })
}

/// Fill a buffer of `len` bytes from the platform CSPRNG.
pub fn random_bytes(len: usize) -> Result<Zeroizing<Vec<u8>>, JwtLensError> {
    let mut buf = Zeroizing::new(vec![0u8; len]);
    openssl::rand::rand_bytes(&mut buf).map_err(openssl_error("random number generation failed"))?;
    Ok(buf)
}

/// Generate a text secret for an HMAC algorithm.
///
/// The secret is the base64url encoding of the algorithm's recommended
/// number of random bytes. The text itself is used as the key, so it can
/// be pasted straight into `--secret`.
pub fn generate_secret(algorithm: JwsAlgorithm) -> Result<Zeroizing<String>, JwtLensError> {
    let len = algorithm
        .recommended_secret_len()
        .ok_or_else(|| JwtLensError::KeyMismatch {
            algorithm: algorithm.to_string(),
            expected: "a key pair, not a shared secret",
        })?;
    let bytes = random_bytes(len)?;
    Ok(Zeroizing::new(URL_SAFE_NO_PAD.encode(bytes.as_slice())))
}
