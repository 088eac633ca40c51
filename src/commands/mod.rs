//! Command handlers for each CLI subcommand.
//!
//! Each subcommand is implemented in its own module and exposes
//! a single `execute` function that receives the parsed arguments.
//! Input resolution shared between commands (token and secret sources,
//! key files, the evaluation clock) lives here.

pub mod decode;
pub mod encode;
pub mod keygen;
pub mod lifetime;
pub mod secret;
pub mod verify;

use std::io::{IsTerminal, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use zeroize::Zeroizing;

use crate::cli::KeyArgs;
use crate::core::provider::KeyMaterial;
use crate::core::time_travel::{TimeTarget, parse_time_expression};
use crate::error::JwtLensError;

/// Maximum accepted size for stdin input and key files (1 MB).
const MAX_INPUT_SIZE: u64 = 1_048_576;

/// Resolve the token from the positional argument, an environment
/// variable, or stdin, in that order. The result is trimmed.
///
/// # Errors
///
/// Returns [`JwtLensError::NoTokenProvided`] if the chosen source is empty.
pub fn resolve_token(
    token: Option<&str>,
    token_env: Option<&str>,
) -> Result<Zeroizing<String>, JwtLensError> {
    let raw = if let Some(token) = token {
        Zeroizing::new(token.to_string())
    } else if let Some(name) = token_env {
        read_env_var(name)?
    } else {
        read_stdin()?
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(JwtLensError::NoTokenProvided);
    }
    Ok(Zeroizing::new(trimmed.to_string()))
}

/// Resolve a secret from an argument, an environment variable, or stdin.
///
/// Unlike tokens, secrets are not trimmed: whitespace can be part of one.
/// Only a single trailing newline from stdin is stripped.
pub fn resolve_secret(
    secret: Option<&Zeroizing<String>>,
    secret_env: Option<&str>,
) -> Result<Zeroizing<String>, JwtLensError> {
    let secret = if let Some(secret) = secret {
        secret.clone()
    } else if let Some(name) = secret_env {
        read_env_var(name)?
    } else {
        let mut input = read_stdin()?;
        if input.ends_with('\n') {
            input.pop();
            if input.ends_with('\r') {
                input.pop();
            }
        }
        input
    };

    if secret.is_empty() {
        return Err(JwtLensError::NoSecretProvided);
    }
    Ok(secret)
}

/// Load key material from `--secret`, `--secret-env`, or `--key-file`.
pub fn resolve_key(args: &KeyArgs) -> Result<KeyMaterial, JwtLensError> {
    if let Some(secret) = &args.secret {
        return non_empty_secret(secret.as_bytes());
    }
    if let Some(name) = &args.secret_env {
        let secret = read_env_var(name)?;
        return non_empty_secret(secret.as_bytes());
    }
    if let Some(path) = &args.key_file {
        return read_key_file(path).map(KeyMaterial::pem);
    }
    Err(JwtLensError::NoKeyProvided)
}

fn non_empty_secret(bytes: &[u8]) -> Result<KeyMaterial, JwtLensError> {
    if bytes.is_empty() {
        return Err(JwtLensError::NoKeyProvided);
    }
    Ok(KeyMaterial::secret(bytes.to_vec()))
}

/// Read a PEM key file with a size limit.
fn read_key_file(path: &Path) -> Result<Zeroizing<Vec<u8>>, JwtLensError> {
    let key_file_error = |reason: String| JwtLensError::KeyFile {
        path: path.display().to_string(),
        reason,
    };

    let file = std::fs::File::open(path).map_err(|e| key_file_error(e.kind().to_string()))?;
    let mut bytes = Zeroizing::new(Vec::new());
    file.take(MAX_INPUT_SIZE + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| key_file_error(e.kind().to_string()))?;

    if bytes.len() as u64 > MAX_INPUT_SIZE {
        return Err(key_file_error(format!(
            "file exceeds maximum size of {MAX_INPUT_SIZE} bytes"
        )));
    }
    Ok(bytes)
}

/// Read an environment variable after validating its name.
fn read_env_var(name: &str) -> Result<Zeroizing<String>, JwtLensError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(JwtLensError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    std::env::var(name)
        .map(Zeroizing::new)
        .map_err(|_| JwtLensError::EnvVarNotFound {
            name: name.to_string(),
        })
}

/// Read all of stdin, unless it is an interactive terminal.
fn read_stdin() -> Result<Zeroizing<String>, JwtLensError> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(Zeroizing::new(String::new()));
    }

    let mut input = Zeroizing::new(String::new());
    stdin
        .lock()
        .take(MAX_INPUT_SIZE)
        .read_to_string(&mut input)
        .map_err(|e| JwtLensError::Io {
            context: "failed to read stdin".to_string(),
            reason: e.kind().to_string(),
        })?;
    Ok(input)
}

/// The instant time claims are evaluated at: the wall clock, or the
/// `--time-travel` target when one is given.
pub fn evaluation_time(
    time_travel: Option<&str>,
) -> Result<(i64, Option<TimeTarget>), JwtLensError> {
    let now = Utc::now();
    match time_travel {
        Some(expression) => {
            let target = parse_time_expression(expression, now)?;
            Ok((target.unix_seconds(), Some(target)))
        }
        None => Ok((now.timestamp(), None)),
    }
}

/// Parse a JSON command-line argument.
pub fn parse_json_argument(
    argument: &'static str,
    text: &str,
) -> Result<serde_json::Value, JwtLensError> {
    serde_json::from_str(text).map_err(|e| JwtLensError::InvalidJsonArgument {
        argument,
        reason: e.to_string(),
    })
}

/// Format Unix seconds as a UTC timestamp, or the raw number if out of range.
pub fn format_timestamp(seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(seconds, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| seconds.to_string())
}
