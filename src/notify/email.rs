//! SMTP delivery of plain-text notification emails.

use super::{EmailMessage, NotifyError};
use crate::config::SmtpConfig;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn sender(&self) -> Result<Mailbox, NotifyError> {
        Ok(Mailbox::new(
            Some(self.config.from_name.clone()),
            self.config.from_email.parse()?,
        ))
    }

    pub fn build_message(&self, to: &str, message: &EmailMessage) -> Result<Message, NotifyError> {
        Message::builder()
            .from(self.sender()?)
            .to(to.parse()?)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| NotifyError::Build(e.to_string()))
    }

    pub fn send(&self, to: &str, message: &EmailMessage) -> Result<(), NotifyError> {
        let email = self.build_message(to, message)?;

        let mut builder = SmtpTransport::starttls_relay(&self.config.host)?.port(self.config.port);
        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        builder.build().send(&email)?;
        tracing::info!(to, subject = %message.subject, "notification email sent");
        Ok(())
    }
}
