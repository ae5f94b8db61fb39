use super::{load_valid_config, runtime};
use anyhow::Context;
use iss_core::SmtpMailer;
use std::path::Path;

/// `iss-notifier check-email`: connect and authenticate, send nothing.
pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = load_valid_config(config_path)?;
    let mailer = SmtpMailer::from_config(&config.email).context("invalid email settings")?;

    runtime()?.block_on(mailer.verify()).with_context(|| {
        format!(
            "could not log in to {}:{} as {} (Gmail needs an app password, not the account password)",
            config.email.smtp_host, config.email.smtp_port, config.email.sender
        )
    })?;

    println!(
        "Email login ok: {} via {}:{}",
        config.email.sender, config.email.smtp_host, config.email.smtp_port
    );
    Ok(())
}
