use crate::output::{print_fields, print_json};
use anyhow::Context;
use clap::Subcommand;
use iss_core::config::{Config, WarnLevel};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective config (password redacted)
    Show,

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(config_path: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    match subcmd {
        ConfigSubcommand::Show => show(config, json),
        ConfigSubcommand::Validate => validate(&config, json),
    }
}

// ---------------------------------------------------------------------------
// show
// ---------------------------------------------------------------------------

fn show(mut config: Config, json: bool) -> anyhow::Result<()> {
    if !config.email.password.is_empty() {
        config.email.password = "********".to_string();
    }
    if json {
        return print_json(&config);
    }

    print_fields(&[
        ("observer", config.observer.to_string()),
        ("sender", config.email.sender),
        ("recipient", config.email.recipient),
        (
            "smtp",
            format!("{}:{}", config.email.smtp_host, config.email.smtp_port),
        ),
        (
            "password",
            if config.email.password.is_empty() {
                "(not set)".to_string()
            } else {
                config.email.password
            },
        ),
        ("position url", config.endpoints.position_url),
        ("sun times url", config.endpoints.sun_times_url),
        ("interval", format!("{}s", config.poll.interval_secs)),
        ("tolerance", format!("{} deg", config.poll.tolerance_deg)),
        (
            "cooldown",
            match config.poll.notification_cooldown_secs {
                0 => "off".to_string(),
                secs => format!("{secs}s"),
            },
        ),
    ]);
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(config: &Config, json: bool) -> anyhow::Result<()> {
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if Config::has_errors(&warnings) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
