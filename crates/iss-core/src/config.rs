use crate::error::{NotifierError, Result};
use crate::overhead::DEFAULT_TOLERANCE_DEG;
use crate::types::Coordinates;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "iss-notifier.yaml";

/// Overrides `email.password` when set and non-empty.
pub const PASSWORD_ENV: &str = "ISS_SMTP_PASSWORD";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// EmailConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub sender: String,
    #[serde(default)]
    pub password: String,
    pub recipient: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

fn default_smtp_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

// ---------------------------------------------------------------------------
// EndpointConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_position_url")]
    pub position_url: String,
    #[serde(default = "default_sun_times_url")]
    pub sun_times_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_position_url() -> String {
    "http://api.open-notify.org/iss-now.json".to_string()
}

fn default_sun_times_url() -> String {
    "https://api.sunrise-sunset.org/json".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            position_url: default_position_url(),
            sun_times_url: default_sun_times_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl EndpointConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// ---------------------------------------------------------------------------
// PollConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    #[serde(default = "default_tolerance")]
    pub tolerance_deg: f64,
    /// 0 disables the cooldown: every qualifying tick sends.
    #[serde(default)]
    pub notification_cooldown_secs: u64,
}

fn default_interval() -> u64 {
    60
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE_DEG
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            tolerance_deg: default_tolerance(),
            notification_cooldown_secs: 0,
        }
    }
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn cooldown(&self) -> Option<chrono::Duration> {
        match self.notification_cooldown_secs {
            0 => None,
            secs => Some(chrono::Duration::seconds(secs as i64)),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub observer: Coordinates,
    pub email: EmailConfig,
    #[serde(default)]
    pub endpoints: EndpointConfig,
    #[serde(default)]
    pub poll: PollConfig,
}

impl Config {
    /// Placeholder config written by `iss-notifier init`.
    pub fn example() -> Self {
        Self {
            observer: Coordinates::new(51.507351, -0.127758),
            email: EmailConfig {
                sender: "your.email@gmail.com".to_string(),
                password: String::new(),
                recipient: "recipient@gmail.com".to_string(),
                smtp_host: default_smtp_host(),
                smtp_port: default_smtp_port(),
            },
            endpoints: EndpointConfig::default(),
            poll: PollConfig::default(),
        }
    }

    /// Read the YAML file at `path` and apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(NotifierError::ConfigNotFound(path.display().to_string()));
        }
        let data = std::fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&data)?;
        cfg.apply_password_override(std::env::var(PASSWORD_ENV).ok());
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        crate::io::atomic_write(path, self.to_yaml()?.as_bytes())
    }

    fn apply_password_override(&mut self, password: Option<String>) {
        if let Some(pw) = password.filter(|p| !p.is_empty()) {
            self.email.password = pw;
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let mut error = |message: String| {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message,
            })
        };

        if !self.observer.is_valid() {
            error(format!(
                "observer ({}, {}) is outside [-90, 90] x [-180, 180]",
                self.observer.latitude, self.observer.longitude
            ));
        }
        for (field, raw) in [
            ("email.sender", &self.email.sender),
            ("email.recipient", &self.email.recipient),
        ] {
            if let Err(e) = raw.parse::<Mailbox>() {
                error(format!("{field} '{raw}' is not an address: {e}"));
            }
        }
        if self.email.password.is_empty() {
            error(format!(
                "email.password is empty (set it in the config or via {PASSWORD_ENV})"
            ));
        }
        if self.poll.interval_secs == 0 {
            error("poll.interval_secs must be greater than 0".to_string());
        }
        if self.poll.tolerance_deg.is_nan() || self.poll.tolerance_deg <= 0.0 {
            error(format!(
                "poll.tolerance_deg must be positive, got {}",
                self.poll.tolerance_deg
            ));
        }

        if self.poll.tolerance_deg > 30.0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "poll.tolerance_deg={} is wide; the ISS is rarely visible that far away",
                    self.poll.tolerance_deg
                ),
            });
        }
        if self.endpoints.request_timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "endpoints.request_timeout_secs=0 disables the request timeout"
                    .to_string(),
            });
        }

        warnings
    }

    pub fn has_errors(warnings: &[ConfigWarning]) -> bool {
        warnings.iter().any(|w| w.level == WarnLevel::Error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
