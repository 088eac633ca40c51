//! Shared test fixtures and helper utilities.
//!
//! Provides pre-built JWT tokens with known claims and helpers for
//! minting tokens and key files in integration tests.
#![allow(dead_code)]

use std::path::Path;

/// The jwt.io sample token.
///
/// Header: `{"alg":"HS256","typ":"JWT"}`
/// Payload: `{"sub":"1234567890","name":"John Doe","iat":1516239022}`
/// Secret: [`JWT_IO_SECRET`]
pub const JWT_IO_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
     eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
     SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

/// Secret that signs [`JWT_IO_TOKEN`].
pub const JWT_IO_SECRET: &str = "your-256-bit-secret";

/// Unsigned token with `{"iat":1000,"nbf":1000,"exp":2000}` and an empty header.
pub const WINDOW_TOKEN: &str = "e30.eyJpYXQiOjEwMDAsIm5iZiI6MTAwMCwiZXhwIjoyMDAwfQ.sig";

/// Unsigned token with `iat` and `exp` both at `i64::MIN`.
pub const EXTREME_CLAIMS_TOKEN: &str =
    "e30.eyJpYXQiOi05MjIzMzcyMDM2ODU0Nzc1ODA4LCJleHAiOi05MjIzMzcyMDM2ODU0Nzc1ODA4fQ.sig";

/// Three segments, none of which decode.
pub const GARBAGE_SEGMENTS_TOKEN: &str = "not.a.jwt";

/// A malformed token with only two parts (missing signature).
pub const MALFORMED_TOKEN_TWO_PARTS: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

/// Header `{"alg":"none"}`.
pub const ALG_NONE_TOKEN: &str = "eyJhbGciOiJub25lIn0.e30.";

/// HMAC secret used to sign test tokens for verify tests.
pub const HMAC_TEST_SECRET: &str = "verify-test-secret-key";

/// Create an HS256-signed token with the given claims.
pub fn create_hs256_token(secret: &str, claims: &serde_json::Value) -> String {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&header, claims, &key).unwrap()
}

/// Standard test claims used across verify tests.
pub fn standard_claims() -> serde_json::Value {
    serde_json::json!({
        "sub": "1234567890",
        "name": "Test User",
        "iat": 1516239022
    })
}

/// Run `keygen --out-dir` for `alg` into `dir`.
pub fn generate_keys(alg: &str, dir: &Path) {
    assert_cmd::cargo::cargo_bin_cmd!("jwt-lens")
        .args(["keygen", "--alg", alg, "--out-dir"])
        .arg(dir)
        .assert()
        .success();
}

/// Sign `payload` with the private key in `dir` and return the token.
pub fn encode_with_key_file(alg: &str, payload: &str, dir: &Path) -> String {
    let output = assert_cmd::cargo::cargo_bin_cmd!("jwt-lens")
        .args(["encode", "--alg", alg, "--payload", payload, "--key-file"])
        .arg(dir.join("private.pem"))
        .output()
        .expect("failed to execute");
    assert!(
        output.status.success(),
        "encode failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}
