use crate::config::EmailConfig;
use crate::error::{NotifierError, Result};
use crate::types::Coordinates;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::response::Code;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Serialize;
use tracing::info;

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A plaintext email, built fresh for every qualifying tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn overhead(observer: Coordinates, now: DateTime<Utc>) -> Self {
        let body = format!(
            "The International Space Station is passing over your location right now.\n\
             \n\
             Location:   {observer}\n\
             Time:       {} UTC\n\
             Conditions: dark\n\
             \n\
             Step outside and look up. The ISS shows up as a bright, steady point of \
             light crossing the sky in a few minutes.\n\
             \n\
             --\n\
             iss-notifier",
            now.format("%Y-%m-%d %H:%M:%S")
        );
        Self {
            subject: "ISS is overhead!".to_string(),
            body,
        }
    }
}

// ---------------------------------------------------------------------------
// Mailer
// ---------------------------------------------------------------------------

/// Delivers one notification to the configured recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;
}

/// STARTTLS submission through an authenticated SMTP relay. A connection is
/// opened per message and closed afterwards.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    user: String,
}

impl SmtpMailer {
    pub fn from_config(email: &EmailConfig) -> Result<Self> {
        let from = parse_mailbox("sender", &email.sender)?;
        let to = parse_mailbox("recipient", &email.recipient)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&email.smtp_host)
            .map_err(|e| NotifierError::Smtp(format!("{}: {e}", email.smtp_host)))?
            .port(email.smtp_port)
            .credentials(Credentials::new(
                email.sender.clone(),
                email.password.clone(),
            ))
            .build();
        Ok(Self {
            transport,
            from,
            to,
            user: email.sender.clone(),
        })
    }

    /// Connect and log in without sending anything.
    pub async fn verify(&self) -> Result<()> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(NotifierError::Smtp(
                "server did not accept the connection".to_string(),
            )),
            Err(e) => Err(self.classify(e)),
        }
    }

    fn build(&self, notification: &Notification) -> Result<Message> {
        Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(notification.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| NotifierError::Email(e.to_string()))
    }

    fn classify(&self, err: lettre::transport::smtp::Error) -> NotifierError {
        rejection(&self.user, err.status(), err.to_string())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let message = self.build(notification)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| self.classify(e))?;
        info!(to = %self.to, "notification sent");
        Ok(())
    }
}

fn parse_mailbox(role: &str, raw: &str) -> Result<Mailbox> {
    raw.parse()
        .map_err(|e| NotifierError::Email(format!("{role} '{raw}': {e}")))
}

/// 530/534/535 are the SMTP replies for missing, refused and bad credentials.
fn is_auth_rejection(code: &Code) -> bool {
    matches!(code.to_string().as_str(), "530" | "534" | "535")
}

/// Map a failed SMTP exchange to `Auth` when the server refused the login,
/// `Smtp` for everything else (including failures with no reply code).
fn rejection(user: &str, status: Option<Code>, reason: String) -> NotifierError {
    match status {
        Some(code) if is_auth_rejection(&code) => NotifierError::Auth {
            user: user.to_string(),
            reason,
        },
        _ => NotifierError::Smtp(reason),
    }
}
