//! Handler for the `lifetime` subcommand.
//!
//! Shows where "now" sits between a token's `iat`/`nbf` and `exp`, and
//! how long remains. With `--watch` the view is redrawn on every clock
//! tick until Ctrl-C; the ticker is released when the loop ends.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use crossbeam::channel::unbounded;
use serde_json::{Value, json};

use crate::cli::LifetimeArgs;
use crate::commands::{evaluation_time, resolve_token};
use crate::core::decoder::{DecodedToken, decode_token};
use crate::core::status::{ValidityStatus, describe_remaining};
use crate::core::ticker::{ClockEvent, Ticker};
use crate::core::timeline::Timeline;
use crate::display::timeline::render_timeline;
use crate::display::token_status::{render_remaining, render_time_travel, status_badge};
use crate::error::JwtLensError;

/// ANSI sequence that clears the screen and homes the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Execute the `lifetime` subcommand with the given arguments.
pub fn execute(args: &LifetimeArgs) -> Result<()> {
    let token = resolve_token(args.token.as_deref(), args.token_env.as_deref())?;
    let decoded = decode_token(&token);
    if decoded.error.is_some() {
        return Err(JwtLensError::Structure.into());
    }

    if args.watch {
        return watch(&decoded, Duration::from_secs(args.interval));
    }

    let (now, time_travel) = evaluation_time(args.time_travel.as_deref())?;
    if args.json {
        let mut report = json_report(&decoded, now);
        report["time_travel"] = json!(time_travel.map(|t| t.expression));
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if let Some(target) = &time_travel {
            println!("{}", render_time_travel(target));
        }
        println!("{}", render_lifetime(&decoded, now));
    }
    Ok(())
}

/// Redraw on every tick until Ctrl-C.
fn watch(decoded: &DecodedToken, interval: Duration) -> Result<()> {
    let (events, receiver) = unbounded();

    let stop = events.clone();
    ctrlc::set_handler(move || {
        let _ = stop.send(ClockEvent::Stop);
    })
    .context("failed to install Ctrl-C handler")?;

    let ticker = Ticker::start(interval, events)?;
    redraw(decoded)?;

    for event in receiver.iter() {
        match event {
            ClockEvent::Tick => redraw(decoded)?,
            ClockEvent::Stop => break,
        }
    }

    ticker.stop();
    tracing::debug!("lifetime watch stopped");
    Ok(())
}

fn redraw(decoded: &DecodedToken) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write!(
        stdout,
        "{CLEAR_SCREEN}{}\n\nPress Ctrl-C to stop.\n",
        render_lifetime(decoded, Utc::now().timestamp())
    )?;
    stdout.flush()?;
    Ok(())
}

/// Render the status, remaining time, and timeline at `now`.
pub fn render_lifetime(decoded: &DecodedToken, now: i64) -> String {
    let status = decoded.status(now);
    let mut lines = vec![format!("Status:  {}", status_badge(status))];

    if status == ValidityStatus::Invalid {
        lines.push("(the payload segment is not valid base64url-encoded JSON)".to_string());
        return lines.join("\n");
    }

    let claims = decoded.time_claims();
    if let Some(remaining) = describe_remaining(status, &claims, now) {
        lines.push(render_remaining(&remaining));
    }

    let timeline = Timeline::new(&claims, now);
    lines.push(String::new());
    lines.push(render_timeline(&timeline));
    if claims.is_empty() {
        lines.push("No time claims: the token has no lifetime bounds.".to_string());
    } else {
        lines.push(format!("Elapsed: {}%", timeline.elapsed_percent()));
    }
    lines.join("\n")
}

/// Machine-readable lifetime view.
pub fn json_report(decoded: &DecodedToken, now: i64) -> Value {
    let status = decoded.status(now);
    let claims = decoded.time_claims();
    let timeline = (status != ValidityStatus::Invalid).then(|| Timeline::new(&claims, now));

    json!({
        "status": status,
        "remaining": describe_remaining(status, &claims, now),
        "timeline": timeline.map(|t| json!({
            "min": t.min,
            "max": t.max,
            "elapsed_percent": t.elapsed_percent(),
            "markers": t.markers(),
        })),
        "evaluated_at": now,
    })
}
