//! Handler for the `verify` subcommand.
//!
//! Verifies a JWT's signature using a shared secret or a PEM-encoded
//! public key, then reports the token's temporal status. Time-travel
//! shifts the status evaluation only; signatures do not depend on time.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use crate::cli::VerifyArgs;
use crate::commands::{evaluation_time, resolve_key, resolve_token};
use crate::core::algorithm::JwsAlgorithm;
use crate::core::decoder::{DecodedToken, decode_token};
use crate::core::provider::{VerificationOutcome, verify};
use crate::display::token_status::{display_token_status, render_time_travel};
use crate::error::JwtLensError;

/// Execute the `verify` subcommand with the given arguments.
///
/// Returns whether the signature is valid so the caller can set the
/// exit code.
pub fn execute(args: &VerifyArgs) -> Result<bool> {
    let token = resolve_token(args.token.as_deref(), args.token_env.as_deref())?;
    let (now, time_travel) = evaluation_time(args.time_travel.as_deref())?;

    let decoded = decode_token(&token);
    if decoded.error.is_some() {
        return Err(JwtLensError::Structure.into());
    }

    let algorithm = resolve_algorithm(args.alg, &decoded)?;
    let key = resolve_key(&args.key)?;
    let outcome = verify(&token, &key, algorithm)?;

    let status = decoded.status(now);
    if args.json {
        let report = json!({
            "algorithm": algorithm,
            "signature": outcome,
            "status": status,
            "time_claims": decoded.time_claims(),
            "evaluated_at": now,
            "time_travel": time_travel.map(|t| t.expression),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(outcome.is_valid());
    }

    println!("Algorithm:   {algorithm}");
    match &outcome {
        VerificationOutcome::Valid => {
            println!("Signature:   {}", "VALID".green().bold());
        }
        VerificationOutcome::Invalid { reason } => {
            println!("Signature:   {} ({reason})", "INVALID".red().bold());
        }
    }
    if let Some(target) = &time_travel {
        println!("{}", render_time_travel(target));
    }
    display_token_status(status, &decoded.time_claims(), now);

    Ok(outcome.is_valid())
}

/// The `--alg` value, or the algorithm the token header declares.
fn resolve_algorithm(
    expected: Option<JwsAlgorithm>,
    decoded: &DecodedToken,
) -> Result<JwsAlgorithm, JwtLensError> {
    if let Some(alg) = expected {
        return Ok(alg);
    }
    match decoded.algorithm() {
        Some(alg) => alg.parse(),
        None if decoded.header.is_none() => {
            Err(JwtLensError::SegmentDecode { segment: "header" })
        }
        None => Err(JwtLensError::MissingAlgorithm),
    }
}
