//! Integration tests for the jwt-lens CLI.
//!
//! Tests argument parsing, help text, version output, subcommand routing,
//! and the behavior of every subcommand through the compiled binary.

mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cmd() -> assert_cmd::Command {
    cargo_bin_cmd!("jwt-lens")
}

fn stdout_json(args: &[&str]) -> serde_json::Value {
    let output = cmd().args(args).output().expect("failed to execute");
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

// --- Help and Version ---

#[test]
fn test_no_args_shows_usage_hint() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_help_flag_shows_description() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON Web Tokens"))
        .stdout(predicate::str::contains("lifetime"))
        .stdout(predicate::str::contains("keygen"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jwt-lens"))
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_verify_help_includes_shell_history_warning() {
    cmd()
        .args(["verify", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--key-file"))
        .stdout(predicate::str::contains("--secret-env"))
        .stdout(predicate::str::contains("shell history"));
}

#[test]
fn test_unknown_subcommand_fails() {
    cmd()
        .arg("unknown")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// --- Decode ---

#[test]
fn test_decode_valid_token_shows_sections() {
    cmd()
        .args(["decode", common::JWT_IO_TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Header ---"))
        .stdout(predicate::str::contains("HS256"))
        .stdout(predicate::str::contains("John Doe"))
        .stdout(predicate::str::contains("--- Signature ---"))
        .stdout(predicate::str::contains("SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c"))
        .stdout(predicate::str::contains("ACTIVE"))
        .stdout(predicate::str::contains("2018-01-18 01:30:22 UTC"));
}

#[test]
fn test_decode_json_mode_outputs_valid_json() {
    let parsed = stdout_json(&["decode", "--json", common::JWT_IO_TOKEN]);
    assert_eq!(parsed["header"]["alg"], "HS256");
    assert_eq!(parsed["payload"]["sub"], "1234567890");
    assert_eq!(parsed["status"], "active");
    assert_eq!(parsed["time_claims"]["iat"], 1516239022);
}

#[test]
fn test_decode_piped_output_has_no_colors() {
    cmd()
        .args(["decode", common::JWT_IO_TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_decode_undecodable_segments_show_placeholders() {
    cmd()
        .args(["decode", common::GARBAGE_SEGMENTS_TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "(the header segment is not valid base64url-encoded JSON)",
        ))
        .stdout(predicate::str::contains("INVALID"));
}

#[test]
fn test_decode_two_part_token_fails() {
    cmd()
        .args(["decode", common::MALFORMED_TOKEN_TWO_PARTS])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "JWT must have 3 parts (header.payload.signature)",
        ));
}

#[test]
fn test_decode_with_time_travel_expires_token() {
    cmd()
        .args(["decode", common::WINDOW_TOKEN, "--time-travel", "2500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXPIRED"))
        .stdout(predicate::str::contains("Expired 8 minutes ago"))
        .stdout(predicate::str::contains(
            "Time travel: evaluating at 1970-01-01 00:41:40 UTC (2500)",
        ));
}

#[test]
fn test_decode_extreme_claims_do_not_crash() {
    cmd()
        .args(["decode", common::EXTREME_CLAIMS_TOKEN])
        .assert()
        .success()
        .stdout(predicate::str::contains("EXPIRED"))
        .stdout(predicate::str::contains("-9223372036854775808"));
}

#[test]
fn test_verify_extreme_claims_do_not_crash() {
    cmd()
        .args(["verify", common::EXTREME_CLAIMS_TOKEN, "--alg", "HS256", "--secret", "x"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("EXPIRED"))
        .stderr(predicate::str::contains("panicked").not());
}

#[test]
fn test_decode_invalid_time_travel_fails() {
    cmd()
        .args(["decode", common::WINDOW_TOKEN, "--time-travel", "+7x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid time expression '+7x'"));
}

#[test]
fn test_decode_from_stdin_with_trailing_newline() {
    cmd()
        .arg("decode")
        .write_stdin(format!("{}\n", common::JWT_IO_TOKEN))
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"));
}

#[test]
fn test_decode_from_env_var() {
    cmd()
        .args(["decode", "--token-env", "JWT_LENS_TEST_DECODE"])
        .env("JWT_LENS_TEST_DECODE", common::JWT_IO_TOKEN)
        .assert()
        .success()
        .stdout(predicate::str::contains("John Doe"));
}

#[test]
fn test_decode_env_var_not_set_shows_error() {
    cmd()
        .args(["decode", "--token-env", "JWT_LENS_MISSING_VAR"])
        .env_remove("JWT_LENS_MISSING_VAR")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JWT_LENS_MISSING_VAR"));
}

#[test]
fn test_decode_invalid_env_var_name_fails() {
    cmd()
        .args(["decode", "--token-env", "BAD=NAME"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid environment variable name"));
}

#[test]
fn test_decode_no_token_shows_error() {
    cmd()
        .arg("decode")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no token provided"));
}

#[test]
fn test_decode_blank_env_token_shows_error() {
    cmd()
        .args(["decode", "--token-env", "JWT_LENS_BLANK_TOKEN"])
        .env("JWT_LENS_BLANK_TOKEN", "   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no token provided"));
}

// --- Verify ---

#[test]
fn test_verify_hs256_valid_signature() {
    cmd()
        .args([
            "verify",
            common::JWT_IO_TOKEN,
            "--secret",
            common::JWT_IO_SECRET,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Algorithm:   HS256"))
        .stdout(predicate::str::contains("VALID"))
        .stdout(predicate::str::contains("INVALID").not());
}

#[test]
fn test_verify_wrong_secret_exits_nonzero() {
    cmd()
        .args(["verify", common::JWT_IO_TOKEN, "--secret", "wrong-secret"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("INVALID"));
}

#[test]
fn test_verify_secret_from_env_json() {
    let token = common::create_hs256_token(common::HMAC_TEST_SECRET, &common::standard_claims());
    let output = cmd()
        .args(["verify", &token, "--secret-env", "JWT_LENS_TEST_SECRET", "--json"])
        .env("JWT_LENS_TEST_SECRET", common::HMAC_TEST_SECRET)
        .output()
        .expect("failed to execute");

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["algorithm"], "HS256");
    assert_eq!(parsed["signature"]["result"], "valid");
    assert_eq!(parsed["status"], "active");
}

#[test]
fn test_verify_expected_algorithm_mismatch_is_invalid() {
    cmd()
        .args([
            "verify",
            common::JWT_IO_TOKEN,
            "--alg",
            "HS384",
            "--secret",
            common::JWT_IO_SECRET,
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("INVALID"));
}

#[test]
fn test_verify_unsupported_header_algorithm_fails() {
    cmd()
        .args(["verify", common::ALG_NONE_TOKEN, "--secret", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unsupported algorithm: none"));
}

#[test]
fn test_verify_header_without_alg_asks_for_alg() {
    cmd()
        .args(["verify", "e30.e30.sig", "--secret", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("token header has no 'alg'; pass --alg"));
}

#[test]
fn test_verify_unsupported_alg_flag_is_usage_error() {
    cmd()
        .args(["verify", common::JWT_IO_TOKEN, "--alg", "PS256", "--secret", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unsupported algorithm"));
}

#[test]
fn test_verify_without_key_fails() {
    cmd()
        .args(["verify", common::JWT_IO_TOKEN])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no key provided"));
}

#[test]
fn test_verify_hmac_with_key_file_is_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    common::generate_keys("ES256", dir.path());
    cmd()
        .args(["verify", common::JWT_IO_TOKEN, "--key-file"])
        .arg(dir.path().join("public.pem"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("HS256 requires a shared secret"));
}

// --- Keygen, Encode and Verify round trips ---

fn assert_key_file_round_trip(alg: &str) {
    let dir = tempfile::tempdir().unwrap();
    common::generate_keys(alg, dir.path());
    let token = common::encode_with_key_file(alg, r#"{"sub":"round-trip"}"#, dir.path());

    cmd()
        .args(["verify", &token, "--key-file"])
        .arg(dir.path().join("public.pem"))
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Algorithm:   {alg}")))
        .stdout(predicate::str::contains("INVALID").not());
}

#[test]
fn test_rs256_round_trip() {
    assert_key_file_round_trip("RS256");
}

#[test]
fn test_es256_round_trip() {
    assert_key_file_round_trip("ES256");
}

#[test]
fn test_es384_round_trip() {
    assert_key_file_round_trip("ES384");
}

#[test]
fn test_es512_round_trip() {
    assert_key_file_round_trip("ES512");
}

#[test]
fn test_verify_with_other_public_key_is_invalid() {
    let signer = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    common::generate_keys("ES256", signer.path());
    common::generate_keys("ES256", other.path());
    let token = common::encode_with_key_file("ES256", "{}", signer.path());

    cmd()
        .args(["verify", &token, "--key-file"])
        .arg(other.path().join("public.pem"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("INVALID"));
}

#[test]
fn test_keygen_refuses_to_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    common::generate_keys("ES256", dir.path());
    cmd()
        .args(["keygen", "--alg", "ES256", "--out-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("private.pem"));
}

#[test]
fn test_keygen_hmac_secret_length() {
    let output = cmd()
        .args(["keygen", "--alg", "HS256"])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    let secret = String::from_utf8(output.stdout).unwrap();
    // 32 random bytes in unpadded base64url.
    assert_eq!(secret.trim().len(), 43);
}

#[test]
fn test_keygen_json_contains_pem_pair() {
    let parsed = stdout_json(&["keygen", "--alg", "ES384", "--json"]);
    assert_eq!(parsed["algorithm"], "ES384");
    assert!(
        parsed["public_key"]
            .as_str()
            .unwrap()
            .contains("BEGIN PUBLIC KEY")
    );
    assert!(
        parsed["private_key"]
            .as_str()
            .unwrap()
            .contains("BEGIN PRIVATE KEY")
    );
}

#[test]
fn test_keygen_rejects_unsupported_rsa_size() {
    cmd()
        .args(["keygen", "--alg", "RS256", "--rsa-bits", "1024"])
        .assert()
        .failure();
}

#[test]
fn test_encode_hs256_then_verify() {
    let output = cmd()
        .args([
            "encode",
            "--alg",
            "HS256",
            "--payload",
            r#"{"sub":"alice"}"#,
            "--header",
            r#"{"kid":"k1"}"#,
            "--secret",
            common::HMAC_TEST_SECRET,
            "--iat",
            "--expires",
            "+1h",
        ])
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    let token = String::from_utf8(output.stdout).unwrap().trim().to_string();

    let decoded = stdout_json(&["decode", "--json", &token]);
    assert_eq!(decoded["header"]["alg"], "HS256");
    assert_eq!(decoded["header"]["kid"], "k1");
    assert_eq!(decoded["payload"]["sub"], "alice");
    assert_eq!(decoded["status"], "active");
    let iat = decoded["payload"]["iat"].as_i64().unwrap();
    let exp = decoded["payload"]["exp"].as_i64().unwrap();
    assert!((3599..=3601).contains(&(exp - iat)));

    cmd()
        .args(["verify", &token, "--secret", common::HMAC_TEST_SECRET])
        .assert()
        .success();
}

#[test]
fn test_encode_invalid_payload_json_fails() {
    cmd()
        .args(["encode", "--alg", "HS256", "--payload", "{nope", "--secret", "s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid JSON for --payload"));
}

#[test]
fn test_encode_rsa_with_secret_is_mismatch() {
    cmd()
        .args(["encode", "--alg", "RS256", "--payload", "{}", "--secret", "s"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("RS256 requires a PEM key file"));
}

// --- Secret ---

#[test]
fn test_secret_short_hmac_secret_warns() {
    cmd()
        .args(["secret", "--alg", "HS256"])
        .write_stdin(format!("{}\n", common::JWT_IO_SECRET))
        .assert()
        .success()
        .stdout(predicate::str::contains("Length:      19 characters"))
        .stdout(predicate::str::contains("at least 32 bytes"));
}

#[test]
fn test_secret_json_report() {
    let output = cmd()
        .args(["secret", "--secret-env", "JWT_LENS_TEST_STRENGTH", "--json"])
        .env("JWT_LENS_TEST_STRENGTH", "aaaa")
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["length"], 4);
    assert_eq!(parsed["pool_size"], 26);
    assert_eq!(parsed["strength"], "weak");
}

#[test]
fn test_secret_missing_fails() {
    cmd()
        .arg("secret")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no secret provided"));
}

// --- Lifetime ---

#[test]
fn test_lifetime_renders_timeline() {
    cmd()
        .args(["lifetime", common::WINDOW_TOKEN, "--time-travel", "1500"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ACTIVE"))
        .stdout(predicate::str::contains("Expires in 8 minutes"))
        .stdout(predicate::str::contains("Elapsed: 50%"))
        .stdout(predicate::str::contains("[|"));
}

#[test]
fn test_lifetime_json() {
    let parsed = stdout_json(&[
        "lifetime",
        common::WINDOW_TOKEN,
        "--time-travel",
        "1970-01-01T00:25:00Z",
        "--json",
    ]);
    assert_eq!(parsed["status"], "active");
    assert_eq!(parsed["evaluated_at"], 1500);
    assert_eq!(parsed["time_travel"], "1970-01-01T00:25:00Z");
    assert_eq!(parsed["timeline"]["elapsed_percent"], 50);
    assert_eq!(parsed["timeline"]["markers"][0]["label"], "iat");
}

#[test]
fn test_lifetime_watch_conflicts_with_time_travel() {
    cmd()
        .args([
            "lifetime",
            common::WINDOW_TOKEN,
            "--watch",
            "--time-travel",
            "+1h",
        ])
        .assert()
        .code(2);
}

// --- Logging ---

#[test]
fn test_verbose_logs_go_to_stderr() {
    cmd()
        .args(["-v", "decode", "--json", common::JWT_IO_TOKEN])
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("dispatching"));
}
