//! Order intake error types.
//!
//! Every failure maps to a stable code plus a message that is safe to show
//! to the caller. Internal detail stays in the server log.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::config::ConfigError;
use crate::mail::DeliveryError;

use super::types::ErrorResponse;

/// Client-visible error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderErrorCode {
    /// Missing or malformed request fields
    Validation,
    /// Deployment lacks required delivery settings
    Configuration,
    /// The mail relay rejected or failed the send
    Delivery,
}

impl OrderErrorCode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Configuration => "CONFIGURATION_ERROR",
            Self::Delivery => "DELIVERY_ERROR",
        }
    }

    pub fn http_status(self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Configuration | Self::Delivery => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("{0}")]
    Validation(String),

    #[error("delivery configuration incomplete: {0}")]
    Configuration(#[from] ConfigError),

    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

impl OrderError {
    pub fn code(&self) -> OrderErrorCode {
        match self {
            Self::Validation(_) => OrderErrorCode::Validation,
            Self::Configuration(_) => OrderErrorCode::Configuration,
            Self::Delivery(_) => OrderErrorCode::Delivery,
        }
    }

    /// Message returned to the caller. Validation messages only describe the
    /// caller's own payload; server-side failures stay generic.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Configuration(_) => "Order service is not configured".to_string(),
            Self::Delivery(_) => "Email send failed".to_string(),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let code = self.code();
        let body = ErrorResponse {
            success: false,
            code: code.name().to_string(),
            error: self.client_message(),
        };
        (code.http_status(), Json(body)).into_response()
    }
}
