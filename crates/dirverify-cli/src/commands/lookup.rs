//! lookup command - find a user without checking a password

use super::CommandContext;
use anyhow::{Context, Result};
use dirverify_auth::VerificationService;

pub async fn execute(ctx: &CommandContext, service: &VerificationService, username: &str) -> Result<bool> {
    let verification = service
        .lookup_user(username)
        .await
        .context("Lookup could not run")?;

    ctx.report(username, &verification)
}
