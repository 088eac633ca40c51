//! JWT signature validation.
//!
//! Checks only the signature. Temporal claims are left to the status
//! evaluator so an expired token with a good signature still verifies.

use serde::Serialize;

use crate::core::algorithm::JwsAlgorithm;
use crate::core::decoder::{decode_segment, split_segments};
use crate::core::provider::{KeyMaterial, es512, provider_error, sanitize_jwt_error};
use crate::error::JwtLensError;

/// The result of a signature validation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The signature is cryptographically valid.
    Valid,
    /// The signature does not match.
    Invalid {
        /// Human-readable reason for the failure.
        reason: String,
    },
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid {
            reason: reason.into(),
        }
    }
}

/// Verify the signature of `token` with `key` under `algorithm`.
///
/// A token whose header names a different algorithm is reported as
/// invalid rather than verified under the header's choice.
///
/// # Errors
///
/// Returns an error if the token is not three segments, the header does
/// not decode, or the key material is unusable. A signature that simply
/// does not match is an `Ok(VerificationOutcome::Invalid)`.
pub fn verify(
    token: &str,
    key: &KeyMaterial,
    algorithm: JwsAlgorithm,
) -> Result<VerificationOutcome, JwtLensError> {
    key.check_family(algorithm)?;

    let token = token.trim();
    let segments = split_segments(token)?.ok_or(JwtLensError::Structure)?;
    let header = decode_segment(segments.header)
        .ok_or(JwtLensError::SegmentDecode { segment: "header" })?;

    match header.get("alg").and_then(|alg| alg.as_str()) {
        Some(alg) if alg == algorithm.as_str() => {}
        Some(_) => {
            return Ok(VerificationOutcome::invalid(format!(
                "algorithm mismatch: token header does not declare {algorithm}"
            )));
        }
        None => return Ok(VerificationOutcome::invalid("token header has no 'alg'")),
    }

    let signing_input = &token[..segments.header.len() + 1 + segments.payload.len()];
    let matches = match algorithm.to_jsonwebtoken() {
        Some(alg) => {
            let decoding_key = key.decoding_key(algorithm)?;
            match jsonwebtoken::crypto::verify(
                segments.signature,
                signing_input.as_bytes(),
                &decoding_key,
                alg,
            ) {
                Ok(matches) => matches,
                Err(e) => match e.kind() {
                    jsonwebtoken::errors::ErrorKind::Base64(_)
                    | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        return Ok(VerificationOutcome::invalid(format!(
                            "signature {}",
                            sanitize_jwt_error(e.kind())
                        )));
                    }
                    _ => return Err(provider_error(e)),
                },
            }
        }
        None => es512::verify(signing_input.as_bytes(), segments.signature, key.as_bytes())?,
    };

    tracing::debug!(%algorithm, matches, "verified signature");
    Ok(if matches {
        VerificationOutcome::Valid
    } else {
        VerificationOutcome::invalid("signature does not match the provided key")
    })
}
