//! Notification delivery for rendered summaries.

use chrono::Local;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::config::EmailConfig;
use crate::error::{Error, Result};

/// Environment variable consulted for the SMTP password when the config
/// carries none.
pub const SMTP_PASSWORD_ENV: &str = "TODO_NOTIFIER_SMTP_PASSWORD";

/// Delivery channel for rendered summaries.
pub trait Notifier {
    /// Sends the summaries; each entry pairs a generator's display name
    /// with its rendered HTML.
    fn notify(&self, summaries: &[(String, String)]) -> Result<()>;
}

/// Sends one aggregate HTML email over authenticated SMTP.
pub struct EmailNotifier {
    smtp_host: String,
    smtp_port: u16,
    sender: String,
    password: String,
    receivers: Vec<String>,
}

impl EmailNotifier {
    pub fn new(
        smtp_host: impl Into<String>,
        smtp_port: u16,
        sender: impl Into<String>,
        password: impl Into<String>,
        receivers: Vec<String>,
    ) -> Self {
        Self {
            smtp_host: smtp_host.into(),
            smtp_port,
            sender: sender.into(),
            password: password.into(),
            receivers,
        }
    }

    /// Builds a notifier from config, falling back to the
    /// [`SMTP_PASSWORD_ENV`] environment variable for the password.
    pub fn from_config(config: &EmailConfig) -> Result<Self> {
        let password = match &config.password {
            Some(password) => password.clone(),
            None => std::env::var(SMTP_PASSWORD_ENV).map_err(|_| {
                Error::Notify(format!(
                    "no SMTP password in config and {SMTP_PASSWORD_ENV} is unset"
                ))
            })?,
        };
        if config.receivers.is_empty() {
            return Err(Error::Notify("no receivers configured".to_string()));
        }
        Ok(Self::new(
            config.smtp_host.as_str(),
            config.smtp_port,
            config.sender.as_str(),
            password,
            config.receivers.clone(),
        ))
    }

    /// One HTML body with a section per summary, in registry order.
    fn compose(summaries: &[(String, String)]) -> String {
        let mut body = String::from("<html>\n<body>\n");
        for (name, html) in summaries {
            body.push_str(&format!("<h1>{name}</h1>\n<p>\n{html}\n</p><br>\n"));
        }
        body.push_str("</body>\n</html>\n");
        body
    }
}

impl Notifier for EmailNotifier {
    fn notify(&self, summaries: &[(String, String)]) -> Result<()> {
        let subject = format!("TODO Summary - {}", Local::now().date_naive());

        let mut builder = Message::builder()
            .from(self.sender.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_HTML);
        for receiver in &self.receivers {
            builder = builder.to(receiver.parse()?);
        }
        let message = builder.body(Self::compose(summaries))?;

        let transport = SmtpTransport::relay(&self.smtp_host)?
            .port(self.smtp_port)
            .credentials(Credentials::new(self.sender.clone(), self.password.clone()))
            .build();
        transport.send(&message)?;

        info!(
            receivers = self.receivers.len(),
            "todo summary email sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_wraps_each_summary_in_a_section() {
        let summaries = vec![
            ("Module-wise Summary".to_string(), "<table>m</table>".to_string()),
            ("Expired TODO Items".to_string(), "<table>e</table>".to_string()),
        ];
        let body = EmailNotifier::compose(&summaries);
        assert!(body.starts_with("<html>"));
        assert!(body.contains("<h1>Module-wise Summary</h1>"));
        assert!(body.contains("<table>e</table>"));
        assert!(body.trim_end().ends_with("</html>"));
    }

    #[test]
    fn from_config_requires_password_and_receivers() {
        let config = EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 465,
            sender: "todo@example.com".to_string(),
            receivers: vec!["team@example.com".to_string()],
            password: Some("secret".to_string()),
        };
        assert!(EmailNotifier::from_config(&config).is_ok());

        let no_receivers = EmailConfig {
            receivers: Vec::new(),
            ..config
        };
        assert!(EmailNotifier::from_config(&no_receivers).is_err());
    }
}
