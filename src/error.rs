//! Domain error types for jwt-lens.
//!
//! All business-logic errors are defined here using `thiserror`.
//! These errors are converted to user-friendly messages at the CLI boundary.

use thiserror::Error;

/// Errors that can occur during JWT operations.
#[derive(Debug, Error)]
pub enum JwtLensError {
    /// The provided token does not have the expected three-part structure.
    #[error("JWT must have 3 parts (header.payload.signature)")]
    Structure,

    /// A segment required by the current command could not be decoded.
    ///
    /// The decoder itself never raises this; commands that cannot proceed
    /// without a segment (e.g. `verify` needs the header) convert an
    /// absent segment into this error.
    #[error("failed to decode {segment}: not valid base64url-encoded JSON")]
    SegmentDecode {
        /// Which segment failed to decode ("header" or "payload").
        segment: &'static str,
    },

    /// The token header names no algorithm and none was given.
    #[error("token header has no 'alg'; pass --alg")]
    MissingAlgorithm,

    /// The specified algorithm is not supported.
    #[error("unsupported algorithm: {algorithm}")]
    UnsupportedAlgorithm {
        /// The algorithm identifier that was rejected.
        algorithm: String,
    },

    /// The cryptographic provider reported a failure.
    #[error("cryptographic operation failed: {reason}")]
    Provider {
        /// Sanitized description of the failure.
        reason: String,
    },

    /// The supplied key material does not fit the algorithm family.
    #[error("{algorithm} requires {expected}")]
    KeyMismatch {
        /// The requested algorithm.
        algorithm: String,
        /// What kind of key the algorithm expects.
        expected: &'static str,
    },

    /// No key material was supplied for an operation that needs one.
    #[error("no key provided: pass --secret, --secret-env, or --key-file")]
    NoKeyProvided,

    /// Failed to read the provided key file.
    #[error("failed to read key file '{path}': {reason}")]
    KeyFile {
        /// Path to the key file.
        path: String,
        /// Description of the read failure.
        reason: String,
    },

    /// Failed to parse a time-travel expression.
    #[error("invalid time expression '{expression}': {reason}")]
    InvalidTimeExpression {
        /// The time expression that failed to parse.
        expression: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// A JSON command-line argument could not be parsed.
    #[error("invalid JSON for {argument}: {reason}")]
    InvalidJsonArgument {
        /// Which argument was malformed (e.g. "--payload").
        argument: &'static str,
        /// Description of the parsing failure.
        reason: String,
    },

    /// No token was provided via any input method.
    #[error("no token provided: pass a token as an argument, via --token-env, or through stdin")]
    NoTokenProvided,

    /// No secret was provided to the strength checker.
    #[error("no secret provided: pass a secret as an argument, via --secret-env, or through stdin")]
    NoSecretProvided,

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The environment variable name is empty or contains forbidden characters.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },

    /// Reading from stdin or writing an output file failed.
    #[error("{context}: {reason}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Description of the I/O failure.
        reason: String,
    },
}
