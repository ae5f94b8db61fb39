pub mod check_email;
pub mod config;
pub mod init;
pub mod run;
pub mod status;

use anyhow::Context;
use iss_core::config::{Config, WarnLevel};
use std::path::Path;

/// Load the config and refuse to continue if validation finds errors.
pub(crate) fn load_valid_config(path: &Path) -> anyhow::Result<Config> {
    let config = Config::load(path).with_context(|| format!("failed to load {}", path.display()))?;
    let warnings = config.validate();
    for w in &warnings {
        match w.level {
            WarnLevel::Error => tracing::error!("{}", w.message),
            WarnLevel::Warning => tracing::warn!("{}", w.message),
        }
    }
    if Config::has_errors(&warnings) {
        anyhow::bail!(
            "{} has errors; run 'iss-notifier config validate' for details",
            path.display()
        );
    }
    Ok(config)
}

/// Current-thread runtime; the notifier never runs two things at once.
pub(crate) fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start tokio runtime")
}
