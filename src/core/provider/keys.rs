//! Key material accepted by the provider.

use std::fmt;

use jsonwebtoken::{DecodingKey, EncodingKey};
use zeroize::Zeroizing;

use crate::core::algorithm::{AlgorithmFamily, JwsAlgorithm};
use crate::core::provider::provider_error;
use crate::error::JwtLensError;

/// A secret or PEM-encoded key, zeroized on drop.
pub enum KeyMaterial {
    /// Raw HMAC secret bytes.
    Secret(Zeroizing<Vec<u8>>),
    /// PEM-encoded key: PKCS#8 private key for signing, SPKI public key
    /// for verification.
    Pem(Zeroizing<Vec<u8>>),
}

impl KeyMaterial {
    pub fn secret(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Secret(Zeroizing::new(bytes.into()))
    }

    pub fn pem(bytes: impl Into<Zeroizing<Vec<u8>>>) -> Self {
        Self::Pem(bytes.into())
    }

    /// Raw bytes of the key material.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Secret(bytes) | Self::Pem(bytes) => bytes,
        }
    }

    /// Reject key material that does not fit the algorithm family.
    pub fn check_family(&self, algorithm: JwsAlgorithm) -> Result<(), JwtLensError> {
        match (algorithm.family(), self) {
            (AlgorithmFamily::Hmac, Self::Secret(_)) => Ok(()),
            (AlgorithmFamily::Rsa | AlgorithmFamily::Ec, Self::Pem(_)) => Ok(()),
            (AlgorithmFamily::Hmac, Self::Pem(_)) => Err(JwtLensError::KeyMismatch {
                algorithm: algorithm.to_string(),
                expected: "a shared secret (--secret or --secret-env)",
            }),
            (_, Self::Secret(_)) => Err(JwtLensError::KeyMismatch {
                algorithm: algorithm.to_string(),
                expected: "a PEM key file (--key-file)",
            }),
        }
    }

    /// Build a `jsonwebtoken` signing key.
    pub(crate) fn encoding_key(
        &self,
        algorithm: JwsAlgorithm,
    ) -> Result<EncodingKey, JwtLensError> {
        self.check_family(algorithm)?;
        match algorithm.family() {
            AlgorithmFamily::Hmac => Ok(EncodingKey::from_secret(self.as_bytes())),
            AlgorithmFamily::Rsa => {
                EncodingKey::from_rsa_pem(self.as_bytes()).map_err(provider_error)
            }
            AlgorithmFamily::Ec => {
                EncodingKey::from_ec_pem(self.as_bytes()).map_err(provider_error)
            }
        }
    }

    /// Build a `jsonwebtoken` verification key.
    pub(crate) fn decoding_key(
        &self,
        algorithm: JwsAlgorithm,
    ) -> Result<DecodingKey, JwtLensError> {
        self.check_family(algorithm)?;
        match algorithm.family() {
            AlgorithmFamily::Hmac => Ok(DecodingKey::from_secret(self.as_bytes())),
            AlgorithmFamily::Rsa => {
                DecodingKey::from_rsa_pem(self.as_bytes()).map_err(provider_error)
            }
            AlgorithmFamily::Ec => {
                DecodingKey::from_ec_pem(self.as_bytes()).map_err(provider_error)
            }
        }
    }
}

/// Custom `Debug` that never prints key bytes.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Secret(_) => f.write_str("KeyMaterial::Secret([REDACTED])"),
            Self::Pem(_) => f.write_str("KeyMaterial::Pem([REDACTED])"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_key_bytes() {
        let key = KeyMaterial::secret(b"super-secret".to_vec());
        let debug_output = format!("{key:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret"));
    }

    #[test]
    fn test_hmac_requires_secret() {
        let err = KeyMaterial::pem(b"-----BEGIN PUBLIC KEY-----".to_vec())
            .check_family(JwsAlgorithm::HS256)
            .unwrap_err();
        assert!(matches!(err, JwtLensError::KeyMismatch { .. }));
    }

    #[test]
    fn test_asymmetric_requires_pem() {
        for alg in [JwsAlgorithm::RS256, JwsAlgorithm::ES384] {
            let err = KeyMaterial::secret(b"secret".to_vec())
                .check_family(alg)
                .unwrap_err();
            assert!(err.to_string().contains("--key-file"));
        }
    }

    #[test]
    fn test_garbage_pem_is_provider_error() {
        let key = KeyMaterial::pem(b"not a pem".to_vec());
        let err = key.decoding_key(JwsAlgorithm::RS256).err().unwrap();
        assert!(matches!(err, JwtLensError::Provider { .. }));
    }
}
