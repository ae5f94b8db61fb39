use super::{load_valid_config, runtime};
use anyhow::Context;
use iss_core::{Monitor, SmtpMailer};
use std::path::Path;
use tokio_util::sync::CancellationToken;

/// `iss-notifier run`: check the mail login, then poll until Ctrl-C or the
/// first error.
pub fn run(config_path: &Path) -> anyhow::Result<()> {
    let config = load_valid_config(config_path)?;
    let mailer = SmtpMailer::from_config(&config.email).context("invalid email settings")?;

    runtime()?.block_on(async move {
        mailer
            .verify()
            .await
            .context("email login failed; fix the email settings before starting")?;
        tracing::info!(user = %config.email.sender, "email login ok");

        let cancel = CancellationToken::new();
        let on_interrupt = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupt received, stopping");
                on_interrupt.cancel();
            }
        });

        let mut monitor = Monitor::new(config, mailer)?;
        monitor.run(cancel).await?;
        Ok(())
    })
}
