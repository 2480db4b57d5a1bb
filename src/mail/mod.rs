//! Mail Transport
//!
//! The order service talks to the outside world through [`MailTransport`]
//! only. Production uses [`SmtpMailTransport`]; tests substitute a double.

pub mod smtp;

pub use smtp::SmtpMailTransport;

use async_trait::async_trait;
use lettre::message::Mailbox;
use thiserror::Error;

use crate::notification::OrderNotification;

/// Sender and recipient of order notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub from: Mailbox,
    pub to: Mailbox,
}

/// Proof of a successful hand-off to the relay.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryReceipt {
    pub message_id: String,
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// Outbound mail seam.
///
/// A single call is a single delivery attempt; implementations must not
/// retry on their own.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Transport name for logging
    fn name(&self) -> &'static str;

    async fn send(
        &self,
        envelope: &Envelope,
        notification: &OrderNotification,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}
