//! Response bodies for the order and liveness endpoints

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement returned once the relay accepted the notification.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderAck {
    #[schema(example = true)]
    pub success: bool,
    /// Message-ID of the relayed email
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "<9b2f0c1e-5d4a-4f7e-8a61-2f7c3d1b0e55@cedrashoes.example>")]
    pub message_id: Option<String>,
}

impl OrderAck {
    pub fn delivered(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: Some(message_id.into()),
        }
    }
}

/// Error body shared by every failure on `/send-order`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    /// Stable machine-readable error code
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,
    /// Human-readable message, safe to display
    #[schema(example = "items must not be empty")]
    pub error: String,
}

/// Root liveness payload
#[derive(Debug, Serialize, ToSchema)]
pub struct RootStatus {
    #[schema(example = "CedraShoes backend OK")]
    pub status: String,
    /// RFC 3339 server time
    #[schema(example = "2026-10-19T08:30:00.000Z")]
    pub timestamp: String,
    /// Process uptime in seconds
    #[schema(example = 3600.5)]
    pub uptime: f64,
}

/// `/health` payload
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "2026-10-19T08:30:00.000Z")]
    pub timestamp: String,
}
