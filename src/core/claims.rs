//! Extraction of the standard time claims from a decoded payload.

use serde::Serialize;
use serde_json::Value;

/// The `iat`, `nbf`, and `exp` claims of a payload, in Unix seconds.
///
/// A claim only counts when it is a non-zero number. Zero, strings,
/// booleans and every other JSON type are treated the same as a missing
/// claim, so an epoch-zero `exp` never marks a token as expired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeClaims {
    /// Issued-at.
    pub iat: Option<i64>,
    /// Not-before.
    pub nbf: Option<i64>,
    /// Expiration.
    pub exp: Option<i64>,
}

impl TimeClaims {
    /// Read the time claims from a payload value.
    ///
    /// Non-object payloads yield no claims.
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            iat: claim_seconds(payload, "iat"),
            nbf: claim_seconds(payload, "nbf"),
            exp: claim_seconds(payload, "exp"),
        }
    }

    /// Whether none of the three claims is present.
    pub fn is_empty(&self) -> bool {
        self.iat.is_none() && self.nbf.is_none() && self.exp.is_none()
    }
}

/// Read a numeric claim, truncating fractional seconds.
fn claim_seconds(payload: &Value, name: &str) -> Option<i64> {
    let value = payload.get(name)?;
    let seconds = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))?,
        _ => return None,
    };
    (seconds != 0).then_some(seconds)
}
