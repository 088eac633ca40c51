//! JWT structural decoding.
//!
//! Splits a raw compact token into its three segments and decodes the
//! header and payload as JSON. Decoding is best-effort: a segment that
//! fails to decode is reported as absent rather than as an error, and only
//! a wrong segment count produces an error message.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::core::claims::TimeClaims;
use crate::core::status::{ValidityStatus, status_for_payload};
use crate::error::JwtLensError;

/// The three raw segments of a compact token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Base64url-encoded header.
    pub header: &'a str,
    /// Base64url-encoded payload.
    pub payload: &'a str,
    /// Base64url-encoded signature, never decoded.
    pub signature: &'a str,
}

/// The result of decoding a compact token.
///
/// `header` and `payload` are `None` when that segment failed to decode.
/// `error` is set only when the token did not split into three segments,
/// so partial garbage renders as a placeholder rather than an alarm.
///
/// Implements a custom `Debug` that redacts `payload` and `signature`
/// to prevent accidental leakage of sensitive claim data.
#[derive(Clone, Default, PartialEq)]
pub struct DecodedToken {
    /// The parsed JWT header (typically contains `alg` and `typ`).
    pub header: Option<Value>,
    /// The parsed JWT payload (claims).
    pub payload: Option<Value>,
    /// The raw base64url-encoded signature segment.
    pub signature: String,
    /// Structural error message, if the token was not three segments.
    pub error: Option<String>,
}

impl DecodedToken {
    /// Whether this is the neutral state produced by empty input.
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
            && self.payload.is_none()
            && self.signature.is_empty()
            && self.error.is_none()
    }

    /// Time claims extracted from the payload, or all-absent when the
    /// payload did not decode.
    pub fn time_claims(&self) -> TimeClaims {
        self.payload
            .as_ref()
            .map(TimeClaims::from_payload)
            .unwrap_or_default()
    }

    /// Validity status of this token at `now`.
    pub fn status(&self, now: i64) -> ValidityStatus {
        status_for_payload(self.payload.as_ref(), now)
    }

    /// The header's `alg` value, if the header decoded and carries one.
    pub fn algorithm(&self) -> Option<&str> {
        self.header.as_ref()?.get("alg")?.as_str()
    }
}

/// Custom `Debug` that redacts payload and signature to prevent
/// accidental leakage through debug formatting or error chains.
impl fmt::Debug for DecodedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedToken")
            .field("header", &self.header)
            .field("payload", &self.payload.as_ref().map(|_| "[REDACTED]"))
            .field(
                "signature",
                &if self.signature.is_empty() {
                    ""
                } else {
                    "[REDACTED]"
                },
            )
            .field("error", &self.error)
            .finish()
    }
}

/// Split an already-trimmed token on `.` separators.
///
/// Returns `Ok(None)` for empty input, which is the neutral state rather
/// than a failure.
///
/// # Errors
///
/// Returns [`JwtLensError::Structure`] if the token does not have exactly
/// three segments.
pub fn split_segments(token: &str) -> Result<Option<Segments<'_>>, JwtLensError> {
    if token.is_empty() {
        return Ok(None);
    }

    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok(Some(Segments {
            header,
            payload,
            signature,
        })),
        _ => Err(JwtLensError::Structure),
    }
}

/// Base64url-decode a segment, then UTF-8 decode it, then parse it as JSON.
///
/// Returns `None` if any step fails.
pub fn decode_segment(segment: &str) -> Option<Value> {
    let bytes = match URL_SAFE_NO_PAD.decode(segment) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(error = %e, "segment is not valid base64url");
            return None;
        }
    };

    let text = match std::str::from_utf8(&bytes) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(error = %e, "segment is not valid UTF-8");
            return None;
        }
    };

    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(line = e.line(), column = e.column(), "segment is not valid JSON");
            None
        }
    }
}

/// Decode a raw compact token.
///
/// Trims surrounding whitespace, splits the token into segments, and
/// decodes header and payload independently. Never fails: structural
/// errors are reported through [`DecodedToken::error`], per-segment
/// failures through `None` values.
pub fn decode_token(raw: &str) -> DecodedToken {
    let segments = match split_segments(raw.trim()) {
        Ok(Some(segments)) => segments,
        Ok(None) => return DecodedToken::default(),
        Err(e) => {
            tracing::debug!("token rejected: wrong segment count");
            return DecodedToken {
                error: Some(e.to_string()),
                ..DecodedToken::default()
            };
        }
    };

    DecodedToken {
        header: decode_segment(segments.header),
        payload: decode_segment(segments.payload),
        signature: segments.signature.to_string(),
        error: None,
    }
}
