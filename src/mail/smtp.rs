//! SMTP relay transport built on lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::MultiPart;
use lettre::transport::smtp::authentication::{Credentials, Mechanism};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, warn};
use uuid::Uuid;

use super::{DeliveryError, DeliveryReceipt, Envelope, MailTransport};
use crate::config::{ConfigError, MailConfig};
use crate::notification::OrderNotification;

/// STARTTLS submission to a fixed relay with username + API key auth.
pub struct SmtpMailTransport {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    pub fn new(config: &MailConfig) -> Result<Self, ConfigError> {
        let api_key = config.api_key()?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| ConfigError::Invalid {
                field: "mail.smtp_host",
                reason: e.to_string(),
            })?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                api_key.to_string(),
            ))
            .authentication(vec![Mechanism::Plain])
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self { transport })
    }
}

/// Build the MIME message with a fresh Message-ID scoped to the sender domain.
pub(crate) fn build_message(
    envelope: &Envelope,
    notification: &OrderNotification,
) -> Result<(Message, String), DeliveryError> {
    let message_id = format!("<{}@{}>", Uuid::new_v4(), envelope.from.email.domain());

    let message = Message::builder()
        .from(envelope.from.clone())
        .to(envelope.to.clone())
        .subject(notification.subject.clone())
        .message_id(Some(message_id.clone()))
        .multipart(MultiPart::alternative_plain_html(
            notification.text.clone(),
            notification.html.clone(),
        ))
        .map_err(|e| DeliveryError::Build(e.to_string()))?;

    Ok((message, message_id))
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(
        &self,
        envelope: &Envelope,
        notification: &OrderNotification,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let (message, message_id) = build_message(envelope, notification)?;

        match self.transport.send(message).await {
            Ok(response) => {
                debug!(
                    message_id = %message_id,
                    relay_reply = ?response.first_line(),
                    "SMTP relay accepted message"
                );
                Ok(DeliveryReceipt { message_id })
            }
            Err(e) => {
                warn!(message_id = %message_id, error = %e, "SMTP relay send failed");
                Err(DeliveryError::Smtp(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope() -> Envelope {
        Envelope {
            from: "CedraShoes <orders@cedrashoes.example>".parse().unwrap(),
            to: "owner@cedrashoes.example".parse().unwrap(),
        }
    }

    fn notification() -> OrderNotification {
        OrderNotification {
            subject: "📦 طلب جديد من CedraShoes".to_string(),
            text: "الاسم: Ali".to_string(),
            html: "<p>Ali</p>".to_string(),
        }
    }

    #[test]
    fn test_message_id_uses_sender_domain() {
        let (_, message_id) = build_message(&envelope(), &notification()).unwrap();
        assert!(message_id.starts_with('<'));
        assert!(message_id.ends_with("@cedrashoes.example>"));
    }

    #[test]
    fn test_message_carries_both_parts() {
        let (message, message_id) = build_message(&envelope(), &notification()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains(&message_id));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_transport_requires_api_key() {
        let config = MailConfig {
            smtp_host: "smtp.sendgrid.net".to_string(),
            smtp_port: 587,
            smtp_username: "apikey".to_string(),
            timeout_secs: 30,
            api_key: None,
            from: None,
            to: None,
        };
        assert!(matches!(
            SmtpMailTransport::new(&config),
            Err(ConfigError::Missing(_))
        ));
    }
}
