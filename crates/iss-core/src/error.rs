use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("config not found at {0}: run 'iss-notifier init'")]
    ConfigNotFound(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("unexpected response from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("SMTP credentials rejected for {user}: {reason}")]
    Auth { user: String, reason: String },

    #[error("SMTP send failed: {0}")]
    Smtp(String),

    #[error("could not build email: {0}")]
    Email(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl NotifierError {
    pub(crate) fn parse(url: &str, reason: impl Into<String>) -> Self {
        NotifierError::Parse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifierError>;
