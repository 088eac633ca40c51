//! Handler for the `keygen` subcommand.
//!
//! Generates a PEM key pair for RS*/ES* algorithms, or a random text
//! secret for HS* algorithms. Output goes to stdout unless `--out-dir`
//! is given.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::json;

use crate::cli::KeygenArgs;
use crate::core::algorithm::AlgorithmFamily;
use crate::core::provider::{generate_key_pair, generate_secret};
use crate::error::JwtLensError;

/// Execute the `keygen` subcommand with the given arguments.
pub fn execute(args: &KeygenArgs) -> Result<()> {
    if args.alg.family() == AlgorithmFamily::Hmac {
        let secret = generate_secret(args.alg)?;
        match (&args.out_dir, args.json) {
            (Some(dir), _) => {
                let path = dir.join("secret.txt");
                write_private_file(&path, secret.as_bytes())?;
                println!("Wrote {}", path.display());
            }
            (None, true) => {
                let report = json!({"algorithm": args.alg, "secret": secret.as_str()});
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
            (None, false) => println!("{}", secret.as_str()),
        }
        return Ok(());
    }

    let pair = generate_key_pair(args.alg, args.rsa_bits)?;
    match (&args.out_dir, args.json) {
        (Some(dir), _) => {
            let private_path = dir.join("private.pem");
            let public_path = dir.join("public.pem");
            write_private_file(&private_path, pair.private_pem.as_bytes())?;
            fs::write(&public_path, &pair.public_pem).map_err(|e| JwtLensError::Io {
                context: format!("failed to write {}", public_path.display()),
                reason: e.kind().to_string(),
            })?;
            println!("Wrote {}", private_path.display());
            println!("Wrote {}", public_path.display());
        }
        (None, true) => {
            let report = json!({
                "algorithm": args.alg,
                "public_key": pair.public_pem,
                "private_key": pair.private_pem.as_str(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        (None, false) => {
            print!("{}", pair.private_pem.as_str());
            print!("{}", pair.public_pem);
        }
    }
    Ok(())
}

/// Create a new file readable only by the owner where the platform allows.
///
/// Refuses to overwrite an existing file.
fn write_private_file(path: &Path, contents: &[u8]) -> Result<(), JwtLensError> {
    let io_error = |e: std::io::Error| JwtLensError::Io {
        context: format!("failed to write {}", path.display()),
        reason: e.kind().to_string(),
    };

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(io_error)?;
    file.write_all(contents).map_err(io_error)
}
