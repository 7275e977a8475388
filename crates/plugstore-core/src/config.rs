//! Typed configuration for Plugstore components.
//!
//! Values are collected from environment variables (via the server binary's
//! CLI layer) and carried around as plain structs. A missing SMTP host is not
//! an error at startup: the trial-email endpoint answers 503 until the
//! transport is configured.

/// Outbound SMTP transport settings.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    /// Relay host. `None` disables the trial-email endpoint.
    pub host: Option<String>,
    pub port: u16,
    /// Use implicit TLS (SMTPS) instead of plaintext.
    pub secure: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    /// From mailbox for all outgoing mail, e.g. `Plugstore <no-reply@plugstore.dev>`.
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 587,
            secure: false,
            username: None,
            password: None,
            from: "Plugstore <no-reply@plugstore.dev>".to_string(),
        }
    }
}

impl SmtpConfig {
    pub fn is_configured(&self) -> bool {
        self.host.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_smtp_uses_submission_port() {
        let config = SmtpConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.port, 587);
        assert!(!config.secure);
    }
}
