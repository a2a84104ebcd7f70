//! CLI command implementations

pub mod authenticate;
pub mod lookup;
pub mod probe;

use anyhow::Result;
use colored::Colorize;
use dirverify_auth::Verification;
use dirverify_core::AttributeValue;
use serde::Serialize;

/// Context passed to all commands
pub struct CommandContext {
    pub json: bool,
}

#[derive(Serialize)]
struct VerificationReport<'a> {
    username: &'a str,
    message: &'a str,
    #[serde(flatten)]
    verification: &'a Verification,
}

impl CommandContext {
    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print a verification outcome and return whether it succeeded
    pub fn report(&self, username: &str, verification: &Verification) -> Result<bool> {
        if self.is_json() {
            let report = VerificationReport {
                username,
                message: verification.error_message(),
                verification,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else if verification.is_success() {
            println!("{} {}", "✓".green().bold(), username.bold());
            if let Some(dn) = &verification.user_dn {
                println!("  {}: {}", "DN".cyan(), dn);
            }
            for (name, value) in verification.attributes() {
                println!("  {}: {}", name.cyan(), format_value(value));
            }
        } else {
            println!(
                "{} {}: {} ({})",
                "✗".red().bold(),
                username.bold(),
                verification.error_message(),
                verification.code
            );
        }

        Ok(verification.is_success())
    }
}

fn format_value(value: &AttributeValue) -> String {
    match value {
        AttributeValue::Single(value) => value.clone(),
        AttributeValue::Multi(values) => values.join(", "),
    }
}
