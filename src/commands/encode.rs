//! Handler for the `encode` subcommand.
//!
//! Signs a JSON payload into a compact JWT and prints it on stdout.

use anyhow::Result;
use chrono::Utc;
use serde_json::Value;

use crate::cli::EncodeArgs;
use crate::commands::{parse_json_argument, resolve_key};
use crate::core::provider::sign;
use crate::core::time_travel::parse_time_expression;
use crate::error::JwtLensError;

/// Execute the `encode` subcommand with the given arguments.
pub fn execute(args: &EncodeArgs) -> Result<()> {
    let mut payload = parse_json_argument("--payload", &args.payload)?;
    let header = args
        .header
        .as_deref()
        .map(|text| parse_json_argument("--header", text))
        .transpose()?;

    apply_time_claims(&mut payload, args)?;

    let key = resolve_key(&args.key)?;
    let token = sign(&payload, header.as_ref(), &key, args.alg)?;
    println!("{token}");
    Ok(())
}

/// Fill `iat`, `exp` and `nbf` from the time flags.
fn apply_time_claims(payload: &mut Value, args: &EncodeArgs) -> Result<(), JwtLensError> {
    let wants_claims = args.iat || args.expires.is_some() || args.not_before.is_some();
    let Value::Object(claims) = payload else {
        if wants_claims {
            return Err(JwtLensError::InvalidJsonArgument {
                argument: "--payload",
                reason: "time claims can only be added to a JSON object".to_string(),
            });
        }
        return Ok(());
    };

    let now = Utc::now();
    if args.iat {
        claims.insert("iat".to_string(), Value::from(now.timestamp()));
    }
    if let Some(expression) = &args.expires {
        let target = parse_time_expression(expression, now)?;
        claims.insert("exp".to_string(), Value::from(target.unix_seconds()));
    }
    if let Some(expression) = &args.not_before {
        let target = parse_time_expression(expression, now)?;
        claims.insert("nbf".to_string(), Value::from(target.unix_seconds()));
    }
    Ok(())
}
