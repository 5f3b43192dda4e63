/// Email service for delivering password reset codes
use crate::config::EmailSettings;
use crate::error::{AuthError, Result};
use lettre::message::{header, Mailbox, Message, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use std::sync::Arc;
use tracing::{info, warn};

/// Async SMTP transport wrapper.
///
/// When no SMTP host is configured the service runs in no-op mode and only
/// logs, which keeps development and tests free of mail infrastructure.
#[derive(Clone)]
pub struct EmailService {
    transport: Option<Arc<AsyncSmtpTransport<Tokio1Executor>>>,
    from: Mailbox,
}

impl EmailService {
    pub fn new(config: &EmailSettings) -> Result<Self> {
        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| AuthError::Internal(format!("invalid SMTP_FROM address: {}", e)))?;

        let transport = if config.smtp_host.trim().is_empty() {
            warn!("SMTP host not configured; email service will operate in no-op mode");
            None
        } else {
            let builder = if config.use_starttls {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            } else {
                AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            }
            .map_err(|e| {
                AuthError::Internal(format!("failed to configure SMTP transport: {}", e))
            })?
            .port(config.smtp_port);

            let builder = if let (Some(username), Some(password)) =
                (&config.smtp_username, &config.smtp_password)
            {
                builder.credentials(Credentials::new(username.to_string(), password.to_string()))
            } else {
                builder
            };

            Some(Arc::new(builder.build()))
        };

        Ok(Self { transport, from })
    }

    /// Check if SMTP transport is enabled
    pub fn is_enabled(&self) -> bool {
        self.transport.is_some()
    }

    /// Send the password reset one-time code
    pub async fn send_reset_code(&self, recipient: &str, code: &str) -> Result<()> {
        let subject = "Password reset code";
        let text_body = format!(
            "Your password reset code is: {}\n\nThe code expires in 2 minutes.\n\nIf you did not request this, please ignore this email.",
            code
        );
        let html_body = format!(
            r#"<p>Your password reset code is: <strong>{}</strong></p>
<p>The code expires in 2 minutes.</p>
<p>If you did not request this, please ignore this email.</p>"#,
            code
        );

        self.send_html_email(recipient, subject, &html_body, &text_body)
            .await
    }

    /// Send an HTML email with a plain text fallback
    async fn send_html_email(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        text_body: &str,
    ) -> Result<()> {
        if let Some(transport) = &self.transport {
            let to = recipient
                .parse::<Mailbox>()
                .map_err(|e| AuthError::Internal(format!("invalid recipient address: {}", e)))?;

            let email = Message::builder()
                .from(self.from.clone())
                .to(to)
                .subject(subject)
                .multipart(
                    MultiPart::alternative()
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_PLAIN)
                                .body(text_body.to_string()),
                        )
                        .singlepart(
                            SinglePart::builder()
                                .header(header::ContentType::TEXT_HTML)
                                .body(html_body.to_string()),
                        ),
                )
                .map_err(|e| AuthError::Internal(format!("failed to build email: {}", e)))?;

            transport
                .send(email)
                .await
                .map_err(|e| AuthError::Internal(format!("failed to send email: {}", e)))?;
            info!(subject, "email sent successfully");
        } else {
            info!(
                subject,
                recipient, "email service running in no-op mode; skipping actual send"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_settings() -> EmailSettings {
        EmailSettings {
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_username: None,
            smtp_password: None,
            smtp_from: "noreply@localhost".to_string(),
            use_starttls: false,
        }
    }

    #[test]
    fn unconfigured_host_means_noop_mode() {
        let service = EmailService::new(&noop_settings()).unwrap();
        assert!(!service.is_enabled());
    }

    #[tokio::test]
    async fn noop_send_succeeds_without_transport() {
        let service = EmailService::new(&noop_settings()).unwrap();
        service
            .send_reset_code("user@example.com", "048213")
            .await
            .unwrap();
    }

    #[test]
    fn invalid_from_address_is_rejected() {
        let mut settings = noop_settings();
        settings.smtp_from = "not an address".to_string();
        assert!(EmailService::new(&settings).is_err());
    }
}
