//! Mapping of token time claims onto a 0-100 timeline.

use serde::Serialize;

use crate::core::claims::TimeClaims;

/// A labelled point on the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Marker {
    /// Claim name, or "now".
    pub label: &'static str,
    /// Unix seconds.
    pub timestamp: i64,
    /// Position in percent.
    pub percent: u8,
}

/// The span covered by a token's claims and the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timeline {
    /// Earliest of `iat`, `nbf` and `now`.
    pub min: i64,
    /// Latest of `exp` and `now`.
    pub max: i64,
    #[serde(skip)]
    claims: TimeClaims,
    #[serde(skip)]
    now: i64,
}

impl Timeline {
    /// Compute the span for the given claims at `now`.
    pub fn new(claims: &TimeClaims, now: i64) -> Self {
        let min = claims
            .iat
            .unwrap_or(now)
            .min(claims.nbf.unwrap_or(now))
            .min(now);
        let max = claims.exp.unwrap_or(now).max(now);
        Self {
            min,
            max,
            claims: *claims,
            now,
        }
    }

    /// Position of `value` in percent.
    ///
    /// An absent value maps to 0. A zero-width span (no claims, or all
    /// claims equal to `now`) maps every point to 0.
    pub fn percent(&self, value: Option<i64>) -> u8 {
        timeline_percent(value, self.min, self.max)
    }

    /// Position of `now`.
    pub fn elapsed_percent(&self) -> u8 {
        self.percent(Some(self.now))
    }

    /// The present claims plus `now`, in chronological order.
    pub fn markers(&self) -> Vec<Marker> {
        let mut markers: Vec<Marker> = [
            ("iat", self.claims.iat),
            ("nbf", self.claims.nbf),
            ("now", Some(self.now)),
            ("exp", self.claims.exp),
        ]
        .into_iter()
        .filter_map(|(label, timestamp)| {
            timestamp.map(|timestamp| Marker {
                label,
                timestamp,
                percent: self.percent(Some(timestamp)),
            })
        })
        .collect();
        markers.sort_by_key(|m| m.timestamp);
        markers
    }
}

/// Map `value` into `min..=max` as a rounded percentage.
pub fn timeline_percent(value: Option<i64>, min: i64, max: i64) -> u8 {
    let Some(value) = value else {
        return 0;
    };
    if max <= min {
        return 0;
    }

    let ratio = (value as f64 - min as f64) / (max as f64 - min as f64);
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}
