//! CLI argument definitions for jwt-lens.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing.
//!
//! # Security
//!
//! Argument structs that can hold tokens or secrets implement custom
//! `Debug` to redact them and prevent accidental leakage through debug
//! formatting, error chains, or logging.

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use zeroize::Zeroizing;

use crate::core::algorithm::JwsAlgorithm;

/// An offline-first CLI for decoding, signing, verifying, and timing
/// JSON Web Tokens (JWTs).
#[derive(Debug, Parser)]
#[command(name = "jwt-lens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Decode and inspect a JWT without verifying its signature.
    Decode(DecodeArgs),

    /// Verify a JWT's signature using a shared secret or a PEM public key.
    Verify(VerifyArgs),

    /// Sign a JSON payload into a compact JWT.
    Encode(EncodeArgs),

    /// Generate an RSA/EC key pair, or a random secret for HS* algorithms.
    Keygen(KeygenArgs),

    /// Estimate the strength of an HMAC secret.
    Secret(SecretArgs),

    /// Show a token's lifetime on a timeline.
    Lifetime(LifetimeArgs),
}

impl Commands {
    /// Subcommand name, for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Verify(_) => "verify",
            Self::Encode(_) => "encode",
            Self::Keygen(_) => "keygen",
            Self::Secret(_) => "secret",
            Self::Lifetime(_) => "lifetime",
        }
    }
}

/// Arguments for the `decode` subcommand.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// The JWT token to decode. If omitted, reads from stdin.
    pub token: Option<String>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,

    /// Evaluate time claims at a simulated time.
    ///
    /// Accepts relative expressions like "+7d", "-1h", "+30m" or
    /// absolute timestamps in ISO 8601 or Unix epoch format.
    #[arg(long, value_name = "EXPR")]
    pub time_travel: Option<String>,

    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Custom `Debug` that redacts the token field to prevent accidental leakage.
impl fmt::Debug for DecodeArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeArgs")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .field("time_travel", &self.time_travel)
            .field("json", &self.json)
            .finish()
    }
}

/// Key material options shared by `verify` and `encode`.
#[derive(clap::Args)]
pub struct KeyArgs {
    /// HMAC shared secret.
    ///
    /// WARNING: Passing secrets via CLI arguments may expose them in shell
    /// history. Prefer using --secret-env instead.
    #[arg(
        long,
        value_name = "SECRET",
        value_parser = parse_zeroizing_string,
        conflicts_with_all = ["secret_env", "key_file"]
    )]
    pub secret: Option<Zeroizing<String>>,

    /// Read the HMAC secret from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME", conflicts_with = "key_file")]
    pub secret_env: Option<String>,

    /// Path to a PEM-encoded key file (RSA or EC).
    ///
    /// A public key (SPKI) for `verify`, a private key (PKCS#8) for `encode`.
    #[arg(long, value_name = "FILE")]
    pub key_file: Option<PathBuf>,
}

impl fmt::Debug for KeyArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyArgs")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("secret_env", &self.secret_env)
            .field("key_file", &self.key_file)
            .finish()
    }
}

/// Arguments for the `verify` subcommand.
#[derive(clap::Args)]
pub struct VerifyArgs {
    /// The JWT token to verify. If omitted, reads from stdin.
    pub token: Option<String>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,

    /// Expected algorithm. Defaults to the token header's `alg`.
    #[arg(long, value_name = "ALG", value_parser = parse_algorithm)]
    pub alg: Option<JwsAlgorithm>,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Evaluate time claims at a simulated time.
    ///
    /// Accepts relative expressions like "+7d", "-1h", "+30m" or
    /// absolute timestamps in ISO 8601 or Unix epoch format.
    #[arg(long, value_name = "EXPR")]
    pub time_travel: Option<String>,

    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Custom `Debug` that redacts token and secret fields to prevent
/// accidental leakage through debug formatting or error chains.
impl fmt::Debug for VerifyArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyArgs")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .field("alg", &self.alg)
            .field("key", &self.key)
            .field("time_travel", &self.time_travel)
            .field("json", &self.json)
            .finish()
    }
}

/// Arguments for the `encode` subcommand.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Signing algorithm.
    #[arg(long, value_name = "ALG", value_parser = parse_algorithm)]
    pub alg: JwsAlgorithm,

    /// Payload claims as a JSON object.
    #[arg(long, value_name = "JSON")]
    pub payload: String,

    /// Extra header fields as a JSON object (`alg` is always overwritten).
    #[arg(long, value_name = "JSON")]
    pub header: Option<String>,

    #[command(flatten)]
    pub key: KeyArgs,

    /// Set `iat` to the current time.
    #[arg(long)]
    pub iat: bool,

    /// Set `exp` from a time expression, e.g. "+1h" or an ISO 8601 timestamp.
    #[arg(long, value_name = "EXPR")]
    pub expires: Option<String>,

    /// Set `nbf` from a time expression.
    #[arg(long, value_name = "EXPR")]
    pub not_before: Option<String>,
}

impl fmt::Debug for EncodeArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeArgs")
            .field("alg", &self.alg)
            .field("payload", &"[REDACTED]")
            .field("header", &self.header)
            .field("key", &self.key)
            .field("iat", &self.iat)
            .field("expires", &self.expires)
            .field("not_before", &self.not_before)
            .finish()
    }
}

/// Arguments for the `keygen` subcommand.
#[derive(Debug, clap::Args)]
pub struct KeygenArgs {
    /// Algorithm to generate key material for.
    #[arg(long, value_name = "ALG", value_parser = parse_algorithm)]
    pub alg: JwsAlgorithm,

    /// RSA modulus size in bits (2048, 3072, or 4096).
    #[arg(long, value_name = "BITS")]
    pub rsa_bits: Option<u32>,

    /// Write `private.pem` and `public.pem` (or `secret.txt`) into this
    /// directory instead of printing them.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `secret` subcommand.
#[derive(clap::Args)]
pub struct SecretArgs {
    /// The secret to assess. If omitted, reads from stdin.
    ///
    /// WARNING: Passing secrets via CLI arguments may expose them in shell
    /// history. Prefer using --secret-env or piping via stdin instead.
    #[arg(value_parser = parse_zeroizing_string)]
    pub secret: Option<Zeroizing<String>>,

    /// Read the secret from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub secret_env: Option<String>,

    /// Check the length against this HMAC algorithm's recommendation.
    #[arg(long, value_name = "ALG", value_parser = parse_algorithm)]
    pub alg: Option<JwsAlgorithm>,

    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}

impl fmt::Debug for SecretArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretArgs")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("secret_env", &self.secret_env)
            .field("alg", &self.alg)
            .field("json", &self.json)
            .finish()
    }
}

/// Arguments for the `lifetime` subcommand.
#[derive(clap::Args)]
pub struct LifetimeArgs {
    /// The JWT token to inspect. If omitted, reads from stdin.
    pub token: Option<String>,

    /// Read the token from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub token_env: Option<String>,

    /// Evaluate the timeline at a simulated time.
    #[arg(long, value_name = "EXPR", conflicts_with = "watch")]
    pub time_travel: Option<String>,

    /// Keep redrawing every --interval seconds until Ctrl-C.
    #[arg(long, conflicts_with = "json")]
    pub watch: bool,

    /// Refresh interval for --watch, in seconds.
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval: u64,

    /// Output raw JSON without colors (machine-readable).
    #[arg(long)]
    pub json: bool,
}

impl fmt::Debug for LifetimeArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifetimeArgs")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_env", &self.token_env)
            .field("time_travel", &self.time_travel)
            .field("watch", &self.watch)
            .field("interval", &self.interval)
            .field("json", &self.json)
            .finish()
    }
}

/// Parse a string into a `Zeroizing<String>` for secure CLI arguments.
fn parse_zeroizing_string(s: &str) -> Result<Zeroizing<String>, std::convert::Infallible> {
    Ok(Zeroizing::new(s.to_string()))
}

/// Parse an algorithm identifier, rejecting anything outside HS/RS/ES.
fn parse_algorithm(s: &str) -> Result<JwsAlgorithm, crate::error::JwtLensError> {
    s.parse()
}
