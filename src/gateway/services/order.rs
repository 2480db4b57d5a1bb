//! Order Service - validate, render and relay one order
//!
//! Handlers stay thin HTTP adapters; this is where the intake pipeline
//! lives so it can be exercised with a mock transport.

use std::sync::Arc;

use crate::config::{MailConfig, ShopConfig};
use crate::gateway::error::OrderError;
use crate::gateway::types::{OrderRequest, validate_order};
use crate::mail::{DeliveryReceipt, MailTransport};
use crate::notification;

/// Order intake: validate → check delivery config → render → send.
///
/// One send attempt per call. Failures are terminal for the request.
pub struct OrderService {
    transport: Arc<dyn MailTransport>,
    mail: MailConfig,
    shop: ShopConfig,
}

impl OrderService {
    pub fn new(transport: Arc<dyn MailTransport>, mail: MailConfig, shop: ShopConfig) -> Self {
        Self {
            transport,
            mail,
            shop,
        }
    }

    pub async fn handle(&self, req: OrderRequest) -> Result<DeliveryReceipt, OrderError> {
        // 1. Validate fields before anything else
        let order = validate_order(req).map_err(|reason| {
            tracing::warn!(%reason, "Order rejected");
            OrderError::Validation(reason)
        })?;

        // 2. Delivery settings must be complete
        let envelope = self.mail.envelope().map_err(|e| {
            tracing::error!(error = %e, "Order not relayed: delivery configuration incomplete");
            OrderError::Configuration(e)
        })?;

        // 3. Render
        let notification = notification::render(&order, &self.shop);
        tracing::debug!(customer = %order.name, phone = %order.phone, "Rendered order notification");

        // 4. Single send attempt
        tracing::info!(
            items = order.items.len(),
            transport = self.transport.name(),
            "Relaying order"
        );
        let receipt = self
            .transport
            .send(&envelope, &notification)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Email send failed");
                OrderError::Delivery(e)
            })?;

        tracing::info!(message_id = %receipt.message_id, "Order relayed");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::error::OrderErrorCode;
    use crate::mail::mock::MockTransport;
    use serde_json::json;

    fn mail_config() -> MailConfig {
        MailConfig {
            smtp_host: "smtp.sendgrid.net".to_string(),
            smtp_port: 587,
            smtp_username: "apikey".to_string(),
            timeout_secs: 30,
            api_key: Some("SG.secret".to_string()),
            from: Some("orders@cedrashoes.example".to_string()),
            to: Some("owner@cedrashoes.example".to_string()),
        }
    }

    fn service(transport: Arc<MockTransport>, mail: MailConfig) -> OrderService {
        OrderService::new(transport, mail, ShopConfig::default())
    }

    fn request(body: serde_json::Value) -> OrderRequest {
        serde_json::from_value(body).unwrap()
    }

    fn example_request() -> OrderRequest {
        request(json!({
            "name": "Ali",
            "phone": "0551",
            "address": "Algiers",
            "items": ["Shoe A", "Shoe B"],
            "total": 4500
        }))
    }

    #[tokio::test]
    async fn test_example_order_relayed_once() {
        let transport = Arc::new(MockTransport::new());
        let svc = service(transport.clone(), mail_config());

        let receipt = svc.handle(example_request()).await.unwrap();

        assert_eq!(receipt.message_id, "<mock-1@test>");
        assert_eq!(transport.send_count(), 1);

        let (envelope, notification) = transport.sent().remove(0);
        assert_eq!(envelope.to.email.to_string(), "owner@cedrashoes.example");
        assert_eq!(envelope.from.email.to_string(), "orders@cedrashoes.example");
        for needle in ["Ali", "0551", "Algiers", "Shoe A", "Shoe B", "4500"] {
            assert!(notification.text.contains(needle), "missing {needle}");
        }
    }

    #[tokio::test]
    async fn test_missing_field_never_reaches_transport() {
        for field in ["name", "phone", "address", "items", "total"] {
            let transport = Arc::new(MockTransport::new());
            let svc = service(transport.clone(), mail_config());

            let mut body = json!({
                "name": "Ali",
                "phone": "0551",
                "address": "Algiers",
                "items": ["Shoe A"],
                "total": 4500
            });
            body.as_object_mut().unwrap().remove(field);

            let err = svc.handle(request(body)).await.unwrap_err();
            assert_eq!(err.code(), OrderErrorCode::Validation, "field {field}");
            assert_eq!(transport.send_count(), 0, "field {field}");
        }
    }

    #[tokio::test]
    async fn test_missing_configuration_never_reaches_transport() {
        for strip in [0, 1, 2] {
            let transport = Arc::new(MockTransport::new());
            let mut mail = mail_config();
            match strip {
                0 => mail.api_key = None,
                1 => mail.from = None,
                _ => mail.to = None,
            }
            let svc = service(transport.clone(), mail);

            let err = svc.handle(example_request()).await.unwrap_err();
            assert_eq!(err.code(), OrderErrorCode::Configuration);
            assert_eq!(transport.send_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_validation_checked_before_configuration() {
        let transport = Arc::new(MockTransport::new());
        let mut mail = mail_config();
        mail.api_key = None;
        let svc = service(transport.clone(), mail);

        let err = svc.handle(OrderRequest::default()).await.unwrap_err();
        assert_eq!(err.code(), OrderErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_transport_failure_is_delivery_error() {
        let transport = Arc::new(MockTransport::new());
        transport.set_fail_send("421 Service not available");
        let svc = service(transport.clone(), mail_config());

        let err = svc.handle(example_request()).await.unwrap_err();

        assert_eq!(err.code(), OrderErrorCode::Delivery);
        assert_eq!(transport.send_count(), 1, "no retry after a failed send");
    }
}
