//! Token status display for temporal claims.
//!
//! Renders human-readable status information for JWT temporal claims
//! (`exp`, `iat`, `nbf`) including expiry status with color coding.

use colored::{ColoredString, Colorize};

use crate::commands::format_timestamp;
use crate::core::claims::TimeClaims;
use crate::core::status::{RemainingTime, ValidityStatus, describe_remaining, format_duration};
use crate::core::time_travel::TimeTarget;

/// Display the temporal status of a JWT's claims.
///
/// - Expired tokens: red "EXPIRED"
/// - Valid tokens: green "ACTIVE"
/// - Not-yet-valid tokens: yellow "NOT YET VALID"
/// - Undecodable payloads: red "INVALID"
pub fn display_token_status(status: ValidityStatus, claims: &TimeClaims, now: i64) {
    println!("{}", render_token_status(status, claims, now));
}

/// Render the status block printed by [`display_token_status`].
pub fn render_token_status(status: ValidityStatus, claims: &TimeClaims, now: i64) -> String {
    let mut lines = vec![format!("Status:      {}", status_badge(status))];

    if status != ValidityStatus::Invalid {
        for (label, value) in [
            ("Issued at:  ", claims.iat),
            ("Not before: ", claims.nbf),
            ("Expires at: ", claims.exp),
        ] {
            if let Some(seconds) = value {
                lines.push(format!(
                    "{label} {} ({})",
                    format_timestamp(seconds),
                    relative(seconds, now)
                ));
            }
        }
    }

    match describe_remaining(status, claims, now) {
        Some(remaining) => lines.push(render_remaining(&remaining)),
        None if status == ValidityStatus::Active => {
            lines.push("No expiration claim: token never expires".dimmed().to_string());
        }
        None => {}
    }

    lines.join("\n")
}

/// "Expires in 8 minutes" style line, red when adverse.
pub fn render_remaining(remaining: &RemainingTime) -> String {
    let text = if remaining.negative {
        format!("{} {} ago", remaining.label, remaining.value)
    } else {
        format!("{} {}", remaining.label, remaining.value)
    };
    if remaining.negative {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Notice shown when claims are evaluated at a simulated time.
pub fn render_time_travel(target: &TimeTarget) -> String {
    format!(
        "Time travel: evaluating at {} ({})",
        format_timestamp(target.unix_seconds()),
        target.expression
    )
    .yellow()
    .to_string()
}

/// Upper-case, color-coded status label.
pub fn status_badge(status: ValidityStatus) -> ColoredString {
    let label = status.label().to_uppercase();
    match status {
        ValidityStatus::Active => label.green().bold(),
        ValidityStatus::Expired | ValidityStatus::Invalid => label.red().bold(),
        ValidityStatus::NotYetValid => label.yellow().bold(),
    }
}

fn relative(seconds: i64, now: i64) -> String {
    if seconds <= now {
        format!("{} ago", format_duration(now.saturating_sub(seconds)))
    } else {
        format!("in {}", format_duration(seconds.saturating_sub(now)))
    }
}
