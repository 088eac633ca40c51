//! Handler for the `secret` subcommand.

use anyhow::Result;
use colored::Colorize;

use crate::cli::SecretArgs;
use crate::commands::resolve_secret;
use crate::core::secret::{SecretReport, Strength, assess_secret};

/// Execute the `secret` subcommand with the given arguments.
pub fn execute(args: &SecretArgs) -> Result<()> {
    let secret = resolve_secret(args.secret.as_ref(), args.secret_env.as_deref())?;
    let report = assess_secret(&secret, args.alg);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", render_report(&report));
    Ok(())
}

fn render_report(report: &SecretReport) -> String {
    let strength = report.strength.label().to_uppercase();
    let strength = match report.strength {
        Strength::Weak => strength.red().bold(),
        Strength::Moderate => strength.yellow().bold(),
        Strength::Strong | Strength::VeryStrong => strength.green().bold(),
    };

    let mut lines = vec![
        format!("Strength:    {strength}"),
        format!("Entropy:     ~{:.0} bits", report.entropy_bits),
        format!(
            "Length:      {} characters ({} bytes)",
            report.length, report.byte_length
        ),
        format!("Alphabet:    {} symbols ({})", report.pool_size, classes(report)),
    ];

    if let (Some(alg), Some(recommended)) = (report.algorithm, report.recommended_bytes) {
        if report.is_too_short() {
            lines.push(
                format!(
                    "Warning:     {alg} secrets should be at least {recommended} bytes; \
                     this one is {}",
                    report.byte_length
                )
                .yellow()
                .to_string(),
            );
        } else {
            lines.push(format!("Length meets the {recommended}-byte minimum for {alg}"));
        }
    }

    lines.join("\n")
}

fn classes(report: &SecretReport) -> String {
    let c = &report.classes;
    let names: Vec<&str> = [
        (c.lowercase, "lowercase"),
        (c.uppercase, "uppercase"),
        (c.digits, "digits"),
        (c.symbols, "symbols"),
        (c.non_ascii, "non-ASCII"),
    ]
    .into_iter()
    .filter_map(|(present, name)| present.then_some(name))
    .collect();

    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
