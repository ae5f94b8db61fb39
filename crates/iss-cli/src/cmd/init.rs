use anyhow::Context;
use iss_core::config::{Config, PASSWORD_ENV};
use iss_core::io;
use std::path::Path;

const HEADER: &str = "\
# iss-notifier configuration
#
# observer: your coordinates in decimal degrees (right-click in a map app).
# email.password: an app password for the sender account. Leave it empty
# here and export ISS_SMTP_PASSWORD instead to keep it out of the file.
";

/// `iss-notifier init`: write an example config for the user to edit.
pub fn run(config_path: &Path, force: bool) -> anyhow::Result<()> {
    let body = Config::example()
        .to_yaml()
        .context("failed to render example config")?;
    let data = format!("{HEADER}\n{body}");

    let written = if force {
        io::atomic_write(config_path, data.as_bytes())?;
        true
    } else {
        io::write_if_missing(config_path, data.as_bytes())?
    };

    if written {
        println!("  created: {}", config_path.display());
        println!(
            "\nEdit observer and email, set {PASSWORD_ENV} (or email.password), then run \
             'iss-notifier check-email'."
        );
    } else {
        println!(
            "  exists:  {} (use --force to overwrite)",
            config_path.display()
        );
    }
    Ok(())
}

