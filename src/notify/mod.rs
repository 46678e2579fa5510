//! Outgoing notifications for locks and reminders.
//!
//! Delivery is best-effort: callers hand messages to a [`Notifier`] after
//! their database work has been committed and only log what fails.

pub mod email;
pub mod push;
pub mod templates;

use crate::config::Config;
use email::SmtpMailer;
use push::PushOutbox;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The channel is not configured (no SMTP server, push switched off).
    #[error("{0} notifications are disabled")]
    Disabled(&'static str),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email build error: {0}")]
    Build(String),

    #[error("Push outbox error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Push payload error: {0}")]
    Payload(#[from] serde_json::Error),
}

impl NotifyError {
    pub fn is_disabled(&self) -> bool {
        matches!(self, NotifyError::Disabled(_))
    }
}

/// Plain-text email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    /// `lock_notification` or `lock_reminder`.
    pub kind: String,
    pub year: i32,
    pub month: u32,
}

/// Delivery channels consumed by the lock workflow.
pub trait Notifier {
    fn send_email(&self, to: &str, message: &EmailMessage) -> Result<(), NotifyError>;
    fn send_push(&self, user_id: i64, payload: &PushPayload) -> Result<(), NotifyError>;
}

/// Email over SMTP plus the push outbox, each optional.
pub struct ChannelNotifier {
    email: Option<SmtpMailer>,
    push: Option<PushOutbox>,
}

impl ChannelNotifier {
    pub fn new(email: Option<SmtpMailer>, push: Option<PushOutbox>) -> Self {
        Self { email, push }
    }

    /// Channels as configured: SMTP when `smtp` is set, the push outbox
    /// (a second connection on the same database) when `push_enabled`.
    pub fn from_config(cfg: &Config) -> Self {
        let email = cfg.smtp.clone().map(SmtpMailer::new);
        let push = if cfg.push_enabled {
            match PushOutbox::open(&cfg.database) {
                Ok(outbox) => Some(outbox),
                Err(e) => {
                    tracing::warn!(error = %e, "push outbox unavailable");
                    None
                }
            }
        } else {
            None
        };
        Self::new(email, push)
    }

    /// No channel at all; every send reports `Disabled`.
    pub fn disabled() -> Self {
        Self::new(None, None)
    }
}

impl Notifier for ChannelNotifier {
    fn send_email(&self, to: &str, message: &EmailMessage) -> Result<(), NotifyError> {
        match &self.email {
            Some(mailer) => mailer.send(to, message),
            None => Err(NotifyError::Disabled("email")),
        }
    }

    fn send_push(&self, user_id: i64, payload: &PushPayload) -> Result<(), NotifyError> {
        match &self.push {
            Some(outbox) => outbox.enqueue(user_id, payload),
            None => Err(NotifyError::Disabled("push")),
        }
    }
}

/// Log a failed delivery. `Disabled` is expected in unconfigured setups and
/// only shows at debug level.
pub(crate) fn log_failure(channel: &str, user_id: i64, err: &NotifyError) {
    if err.is_disabled() {
        tracing::debug!(channel, user_id, "{}", err);
    } else {
        tracing::warn!(channel, user_id, error = %err, "notification failed");
    }
}
