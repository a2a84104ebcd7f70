//! probe command - check the directory and service identity

use super::CommandContext;
use anyhow::{Context, Result};
use colored::Colorize;
use dirverify_auth::VerificationService;

pub async fn execute(ctx: &CommandContext, service: &VerificationService) -> Result<bool> {
    let code = service.probe().await.context("Probe could not run")?;
    let config = service.config();
    let server = format!("{}:{}", config.connection_hostname, config.connection_port);

    if ctx.is_json() {
        let report = serde_json::json!({
            "server": server,
            "code": code,
            "message": code.message(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if code.is_success() {
        println!("{} {} accepts the service identity", "✓".green().bold(), server.bold());
    } else {
        println!("{} {}: {}", "✗".red().bold(), server.bold(), code.message());
    }

    Ok(code.is_success())
}
