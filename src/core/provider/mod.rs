//! Cryptographic provider boundary.
//!
//! Signing and verification go through `jsonwebtoken`'s JWS primitives,
//! except ES512 which that library does not implement and which is
//! delegated to OpenSSL ECDSA. Key pairs and random secrets come from
//! OpenSSL. Every failure is converted to a short [`JwtLensError`] reason;
//! nothing here panics on bad input.

pub mod es512;
pub mod keygen;
pub mod keys;
pub mod signer;
pub mod validator;

pub use keygen::{generate_key_pair, generate_secret};
pub use keys::KeyMaterial;
pub use signer::sign;
pub use validator::{VerificationOutcome, verify};

use jsonwebtoken::errors::ErrorKind;

use crate::error::JwtLensError;

/// Map a `jsonwebtoken` error kind to a user-facing reason.
///
/// Raw library messages can include key parsing internals, so only a
/// fixed vocabulary is exposed.
pub(crate) fn sanitize_jwt_error(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::InvalidSignature => "signature does not match".to_string(),
        ErrorKind::InvalidAlgorithm => "algorithm mismatch".to_string(),
        ErrorKind::InvalidEcdsaKey => "invalid ECDSA key".to_string(),
        ErrorKind::InvalidRsaKey(_) => "invalid RSA key".to_string(),
        ErrorKind::RsaFailedSigning => "RSA signing failed".to_string(),
        ErrorKind::InvalidKeyFormat => "key is not in a supported PEM format".to_string(),
        ErrorKind::InvalidAlgorithmName => "unknown algorithm name".to_string(),
        ErrorKind::Base64(_) => "invalid base64url encoding".to_string(),
        ErrorKind::Json(_) => "invalid JSON".to_string(),
        ErrorKind::Utf8(_) => "invalid UTF-8".to_string(),
        ErrorKind::Crypto(_) => "cryptographic backend error".to_string(),
        _ => "unexpected error".to_string(),
    }
}

/// Convert a `jsonwebtoken` error into a provider failure.
pub(crate) fn provider_error(err: jsonwebtoken::errors::Error) -> JwtLensError {
    tracing::debug!(kind = ?err.kind(), "jsonwebtoken operation failed");
    JwtLensError::Provider {
        reason: sanitize_jwt_error(err.kind()),
    }
}

/// Convert an OpenSSL error stack into a provider failure with a fixed reason.
pub(crate) fn openssl_error(
    reason: &'static str,
) -> impl FnOnce(openssl::error::ErrorStack) -> JwtLensError {
    move |stack| {
        tracing::debug!(error = %stack, reason, "openssl operation failed");
        JwtLensError::Provider {
            reason: reason.to_string(),
        }
    }
}
