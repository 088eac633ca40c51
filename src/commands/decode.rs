//! Handler for the `decode` subcommand.
//!
//! Decodes and pretty-prints a JWT's header and payload without
//! verifying its signature. Supports reading the token from a CLI
//! argument, environment variable, or stdin.
//!
//! A segment that fails to decode is shown as a placeholder, not as an
//! error; only a token that is not three segments fails the command.

use anyhow::Result;
use serde_json::{Value, json};

use crate::cli::DecodeArgs;
use crate::commands::{evaluation_time, resolve_token};
use crate::core::decoder::{DecodedToken, decode_token};
use crate::core::status::describe_remaining;
use crate::display::json_printer::print_json;
use crate::display::token_status::{display_token_status, render_time_travel};
use crate::error::JwtLensError;

/// Execute the `decode` subcommand with the given arguments.
pub fn execute(args: &DecodeArgs) -> Result<()> {
    let token = resolve_token(args.token.as_deref(), args.token_env.as_deref())?;
    let (now, time_travel) = evaluation_time(args.time_travel.as_deref())?;

    let decoded = decode_token(&token);
    if decoded.error.is_some() {
        return Err(JwtLensError::Structure.into());
    }

    if args.json {
        let mut report = json_report(&decoded, now);
        report["time_travel"] = json!(time_travel.map(|t| t.expression));
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_section("Header", decoded.header.as_ref(), "header");
    println!();
    print_section("Payload", decoded.payload.as_ref(), "payload");

    println!("\n--- Signature ---");
    if decoded.signature.is_empty() {
        println!("(empty)");
    } else {
        println!("{}", decoded.signature);
    }

    println!("\n--- Token Status ---");
    if let Some(target) = &time_travel {
        println!("{}", render_time_travel(target));
    }
    display_token_status(decoded.status(now), &decoded.time_claims(), now);
    Ok(())
}

fn print_section(title: &str, value: Option<&Value>, segment: &str) {
    println!("--- {title} ---");
    match value {
        Some(value) => print_json(value, true),
        None => println!("(the {segment} segment is not valid base64url-encoded JSON)"),
    }
}

/// Machine-readable decode result, including the derived status.
pub fn json_report(decoded: &DecodedToken, now: i64) -> Value {
    let claims = decoded.time_claims();
    let status = decoded.status(now);
    json!({
        "header": decoded.header,
        "payload": decoded.payload,
        "signature": decoded.signature,
        "error": decoded.error,
        "status": status,
        "time_claims": claims,
        "remaining": describe_remaining(status, &claims, now),
        "evaluated_at": now,
    })
}
