//! Order submission handler

use std::sync::Arc;

use axum::{Json, extract::State};

use super::super::error::OrderError;
use super::super::state::AppState;
use super::super::types::{ErrorResponse, OrderAck, OrderPayload, OrderRequest};

/// Submit an order
///
/// POST /send-order
///
/// Validates the order, renders the notification and relays it to the shop
/// mailbox with a single send attempt.
#[utoipa::path(
    post,
    path = "/send-order",
    request_body(content = OrderRequest, description = "Order submission", content_type = "application/json"),
    responses(
        (status = 200, description = "Order relayed", body = OrderAck, content_type = "application/json"),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Configuration or delivery failure", body = ErrorResponse)
    ),
    tag = "Orders"
)]
pub async fn send_order(
    State(state): State<Arc<AppState>>,
    OrderPayload(req): OrderPayload,
) -> Result<Json<OrderAck>, OrderError> {
    let receipt = state.orders.handle(req).await?;
    Ok(Json(OrderAck::delivered(receipt.message_id)))
}
