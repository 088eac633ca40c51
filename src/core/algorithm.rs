//! Recognized JWS algorithm identifiers.
//!
//! Only the HMAC, RSA PKCS#1 v1.5 and ECDSA families are accepted. The
//! family is derived from the identifier prefix; any other identifier is
//! rejected before it can reach the cryptographic provider.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::JwtLensError;

/// Algorithm family, derived from the identifier prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmFamily {
    /// `HS*`: shared secret.
    Hmac,
    /// `RS*`: RSA key pair.
    Rsa,
    /// `ES*`: elliptic-curve key pair.
    Ec,
}

/// A supported signing algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum JwsAlgorithm {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    ES256,
    ES384,
    ES512,
}

/// Default RSA modulus size for generated keys.
pub const DEFAULT_RSA_BITS: u32 = 2048;

/// RSA modulus sizes accepted for key generation.
pub const SUPPORTED_RSA_BITS: [u32; 3] = [2048, 3072, 4096];

impl JwsAlgorithm {
    /// Every supported algorithm, in display order.
    pub const ALL: [JwsAlgorithm; 9] = [
        Self::HS256,
        Self::HS384,
        Self::HS512,
        Self::RS256,
        Self::RS384,
        Self::RS512,
        Self::ES256,
        Self::ES384,
        Self::ES512,
    ];

    /// The identifier as it appears in a JWT header.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
            Self::RS256 => "RS256",
            Self::RS384 => "RS384",
            Self::RS512 => "RS512",
            Self::ES256 => "ES256",
            Self::ES384 => "ES384",
            Self::ES512 => "ES512",
        }
    }

    pub fn family(self) -> AlgorithmFamily {
        match self {
            Self::HS256 | Self::HS384 | Self::HS512 => AlgorithmFamily::Hmac,
            Self::RS256 | Self::RS384 | Self::RS512 => AlgorithmFamily::Rsa,
            Self::ES256 | Self::ES384 | Self::ES512 => AlgorithmFamily::Ec,
        }
    }

    /// Digest size in bits.
    pub fn hash_bits(self) -> u32 {
        match self {
            Self::HS256 | Self::RS256 | Self::ES256 => 256,
            Self::HS384 | Self::RS384 | Self::ES384 => 384,
            Self::HS512 | Self::RS512 | Self::ES512 => 512,
        }
    }

    /// Minimum HMAC secret length in bytes (the digest size), `None` for
    /// asymmetric algorithms.
    pub fn recommended_secret_len(self) -> Option<usize> {
        match self.family() {
            AlgorithmFamily::Hmac => Some(self.hash_bits() as usize / 8),
            _ => None,
        }
    }

    /// Curve name for ECDSA algorithms.
    pub fn curve_name(self) -> Option<&'static str> {
        match self {
            Self::ES256 => Some("P-256"),
            Self::ES384 => Some("P-384"),
            Self::ES512 => Some("P-521"),
            _ => None,
        }
    }

    /// The matching `jsonwebtoken` algorithm, if that library implements it.
    ///
    /// `jsonwebtoken` has no ES512, which is handled by the OpenSSL path.
    pub fn to_jsonwebtoken(self) -> Option<jsonwebtoken::Algorithm> {
        use jsonwebtoken::Algorithm;
        match self {
            Self::HS256 => Some(Algorithm::HS256),
            Self::HS384 => Some(Algorithm::HS384),
            Self::HS512 => Some(Algorithm::HS512),
            Self::RS256 => Some(Algorithm::RS256),
            Self::RS384 => Some(Algorithm::RS384),
            Self::RS512 => Some(Algorithm::RS512),
            Self::ES256 => Some(Algorithm::ES256),
            Self::ES384 => Some(Algorithm::ES384),
            Self::ES512 => None,
        }
    }
}

impl FromStr for JwsAlgorithm {
    type Err = JwtLensError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| JwtLensError::UnsupportedAlgorithm {
                algorithm: sanitize_identifier(s),
            })
    }
}

impl fmt::Display for JwsAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip control characters and cap the length of an identifier taken
/// from untrusted input before echoing it in an error message.
fn sanitize_identifier(s: &str) -> String {
    const MAX_CHARS: usize = 32;

    let mut clean: String = s
        .chars()
        .take(MAX_CHARS)
        .map(|c| if c.is_control() { '\u{FFFD}' } else { c })
        .collect();
    if s.chars().count() > MAX_CHARS {
        clean.push_str("...");
    }
    clean
}
