//! Validity status evaluation for JWT time claims.
//!
//! Every function here takes `now` explicitly so results are
//! deterministic; only the command layer reads the wall clock.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::core::claims::TimeClaims;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_DAY: i64 = 86_400;

/// Temporal validity of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityStatus {
    /// Within its validity window, or carrying no restricting claims.
    Active,
    /// Past its `exp`.
    Expired,
    /// Before its `nbf`, or issued in the future.
    NotYetValid,
    /// The payload could not be decoded.
    Invalid,
}

impl ValidityStatus {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Expired => "expired",
            Self::NotYetValid => "not yet valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for ValidityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify time claims against `now`.
///
/// The expiry check runs first, so a token that is both expired and
/// not yet valid reports `Expired`. Comparisons are strict: a token is
/// still active at exactly `exp` and already active at exactly `nbf`.
pub fn evaluate_status(claims: &TimeClaims, now: i64) -> ValidityStatus {
    if claims.exp.is_some_and(|exp| now > exp) {
        ValidityStatus::Expired
    } else if claims.nbf.is_some_and(|nbf| now < nbf) {
        ValidityStatus::NotYetValid
    } else if claims.iat.is_some_and(|iat| now < iat) {
        ValidityStatus::NotYetValid
    } else {
        ValidityStatus::Active
    }
}

/// Status of a possibly-undecoded payload.
///
/// A missing payload is `Invalid` without reaching temporal evaluation.
pub fn status_for_payload(payload: Option<&Value>, now: i64) -> ValidityStatus {
    match payload {
        Some(payload) => evaluate_status(&TimeClaims::from_payload(payload), now),
        None => ValidityStatus::Invalid,
    }
}

/// A labelled remaining (or elapsed) time summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemainingTime {
    /// "Expired", "Valid in" or "Expires in".
    pub label: &'static str,
    /// Formatted magnitude, e.g. "8 minutes".
    pub value: String,
    /// Whether the summary describes an adverse state.
    pub negative: bool,
    /// Magnitude in seconds.
    pub seconds: i64,
}

impl RemainingTime {
    fn new(label: &'static str, seconds: i64, negative: bool) -> Self {
        let seconds = seconds.max(0);
        Self {
            label,
            value: format_duration(seconds),
            negative,
            seconds,
        }
    }
}

/// Summarize how long until (or since) the relevant boundary.
///
/// Returns `None` for an active token without `exp` and for invalid tokens.
pub fn describe_remaining(
    status: ValidityStatus,
    claims: &TimeClaims,
    now: i64,
) -> Option<RemainingTime> {
    match status {
        ValidityStatus::Expired => {
            let exp = claims.exp?;
            Some(RemainingTime::new("Expired", now.saturating_sub(exp), true))
        }
        ValidityStatus::NotYetValid => {
            let start = claims.nbf.or(claims.iat)?;
            Some(RemainingTime::new("Valid in", start.saturating_sub(now), false))
        }
        ValidityStatus::Active => {
            let exp = claims.exp?;
            Some(RemainingTime::new("Expires in", exp.saturating_sub(now), false))
        }
        ValidityStatus::Invalid => None,
    }
}

/// Format a second count using its largest whole unit.
///
/// Each tier truncates: 119 seconds is "1 minute", 86399 is "23 hours".
/// Negative input is treated as zero.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let (amount, unit) = if seconds < SECONDS_PER_MINUTE {
        (seconds, "second")
    } else if seconds < SECONDS_PER_HOUR {
        (seconds / SECONDS_PER_MINUTE, "minute")
    } else if seconds < SECONDS_PER_DAY {
        (seconds / SECONDS_PER_HOUR, "hour")
    } else {
        (seconds / SECONDS_PER_DAY, "day")
    };

    if amount == 1 {
        format!("{amount} {unit}")
    } else {
        format!("{amount} {unit}s")
    }
}
