//! Time-travel debugging for JWT temporal claims.
//!
//! Parses time expressions (relative like "+7d" or absolute like ISO 8601)
//! into the simulated "now" that status evaluation runs against.

use chrono::{DateTime, Duration, Utc};

use crate::error::JwtLensError;

/// A parsed time target for time-travel evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeTarget {
    /// The resolved absolute timestamp.
    pub timestamp: DateTime<Utc>,
    /// The original expression provided by the user.
    pub expression: String,
}

impl TimeTarget {
    /// The target as Unix seconds.
    pub fn unix_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }
}

/// Parse a time-travel expression into an absolute timestamp.
///
/// Supports the following formats:
/// - Relative to `now`: `+7d`, `-1h`, `+30m`, `+1y`, `-5s`, `+2w`
/// - Absolute ISO 8601: `2024-01-15T14:30:00Z`
/// - Absolute Unix epoch: `1705312200`
///
/// # Errors
///
/// Returns an error if the expression doesn't match any known format.
pub fn parse_time_expression(
    expression: &str,
    now: DateTime<Utc>,
) -> Result<TimeTarget, JwtLensError> {
    let trimmed = expression.trim();
    let invalid = |reason: String| JwtLensError::InvalidTimeExpression {
        expression: expression.to_string(),
        reason,
    };

    if trimmed.is_empty() {
        return Err(invalid("expression is empty".to_string()));
    }

    let timestamp = if let Some(rest) = trimmed.strip_prefix('+') {
        now.checked_add_signed(parse_offset(rest).map_err(invalid)?)
            .ok_or_else(|| invalid("resulting time is out of range".to_string()))?
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        now.checked_sub_signed(parse_offset(rest).map_err(invalid)?)
            .ok_or_else(|| invalid("resulting time is out of range".to_string()))?
    } else if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let seconds: i64 = trimmed
            .parse()
            .map_err(|_| invalid("epoch seconds out of range".to_string()))?;
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| invalid("epoch seconds out of range".to_string()))?
    } else {
        DateTime::parse_from_rfc3339(trimmed)
            .map_err(|_| {
                invalid(
                    "expected a relative offset (+7d, -1h), an ISO 8601 timestamp, \
                     or Unix epoch seconds"
                        .to_string(),
                )
            })?
            .with_timezone(&Utc)
    };

    tracing::debug!(target_time = %timestamp, "resolved time-travel expression");
    Ok(TimeTarget {
        timestamp,
        expression: expression.to_string(),
    })
}

/// Parse the `<amount><unit>` part of a relative expression.
fn parse_offset(offset: &str) -> Result<Duration, String> {
    let split = offset
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| "missing unit (use s, m, h, d, w, or y)".to_string())?;
    let (amount, unit) = offset.split_at(split);
    if amount.is_empty() {
        return Err("missing amount".to_string());
    }
    let amount: i64 = amount
        .parse()
        .map_err(|_| "amount out of range".to_string())?;

    let seconds_per_unit = match unit {
        "s" => 1,
        "m" => 60,
        "h" => 3_600,
        "d" => 86_400,
        "w" => 7 * 86_400,
        "y" => 365 * 86_400,
        other => return Err(format!("unknown unit '{other}'")),
    };

    amount
        .checked_mul(seconds_per_unit)
        .and_then(Duration::try_seconds)
        .ok_or_else(|| "amount out of range".to_string())
}
