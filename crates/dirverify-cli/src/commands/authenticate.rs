//! authenticate command - check a user's password

use super::CommandContext;
use anyhow::{Context, Result};
use dirverify_auth::VerificationService;

pub async fn execute(
    ctx: &CommandContext,
    service: &VerificationService,
    username: &str,
    password: &str,
) -> Result<bool> {
    let verification = service
        .authenticate_user(username, password)
        .await
        .context("Authentication could not run")?;

    ctx.report(username, &verification)
}
