//! SMTP delivery for trial-download emails.
//!
//! The transport is built once at startup from `SmtpConfig` and shared across
//! requests; lettre's pooled SMTP transport is safe for concurrent use. There
//! are no retries: a rejected send surfaces to the caller and is recorded in
//! the email audit log by the HTTP layer.

use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use plugstore_core::config::SmtpConfig;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Transport(String),
}

#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    /// Build a mailer from configuration. Returns `Ok(None)` when no SMTP
    /// host is configured, which disables the trial-email endpoint.
    pub fn from_config(config: &SmtpConfig) -> Result<Option<Self>, MailError> {
        let Some(host) = config.host.as_deref() else {
            return Ok(None);
        };

        let builder = if config.secure {
            // Implicit TLS (SMTPS).
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
                .map_err(|e| MailError::Transport(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        let mut builder = builder.port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| MailError::Build(format!("invalid from mailbox: {e}")))?;

        info!(host, port = config.port, secure = config.secure, "SMTP transport configured");

        Ok(Some(Self {
            transport: builder.build(),
            from,
        }))
    }

    /// Send one HTML email and return its Message-ID.
    pub async fn send_html(
        &self,
        to: &str,
        to_name: Option<&str>,
        subject: &str,
        html: &str,
    ) -> Result<String, MailError> {
        let to_mailbox = match to_name {
            Some(name) => format!("{name} <{to}>"),
            None => to.to_string(),
        }
        .parse::<Mailbox>()
        .map_err(|e| MailError::Build(format!("invalid recipient: {e}")))?;

        let message_id = format!("<{}@plugstore>", uuid::Uuid::new_v4());

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .message_id(Some(message_id.clone()))
            .header(ContentType::TEXT_HTML)
            .body(html.to_owned())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(message_id)
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unset_host_yields_no_mailer() {
        let mailer = Mailer::from_config(&SmtpConfig::default()).unwrap();
        assert!(mailer.is_none());
    }

    #[tokio::test]
    async fn configured_host_yields_mailer() {
        let config = SmtpConfig {
            host: Some("smtp.example.com".into()),
            username: Some("mailer".into()),
            password: Some("hunter2".into()),
            ..SmtpConfig::default()
        };
        let mailer = Mailer::from_config(&config).unwrap();
        assert!(mailer.is_some());
    }

    #[test]
    fn invalid_from_mailbox_is_rejected() {
        let config = SmtpConfig {
            host: Some("smtp.example.com".into()),
            from: "definitely not a mailbox".into(),
            ..SmtpConfig::default()
        };
        assert!(matches!(
            Mailer::from_config(&config),
            Err(MailError::Build(_))
        ));
    }
}
