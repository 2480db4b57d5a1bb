//! Order submission types and validation
//!
//! - `OrderRequest`: loosely typed HTTP body, every field optional
//! - `ValidatedOrder`: the same order once every required field checked out
//! - `OrderPayload`: Axum extractor that turns body rejections into validation errors

use std::fmt;
use std::str::FromStr;

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::gateway::error::OrderError;

// ============================================================================
// OrderRequest: HTTP Request Deserialization
// ============================================================================

/// Order as submitted by the storefront.
///
/// Fields are kept as raw JSON so that a wrong type surfaces as a field-level
/// validation message instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct OrderRequest {
    /// Customer name
    #[schema(value_type = String, example = "Ali")]
    pub name: Option<Value>,
    /// Contact phone number
    #[schema(value_type = String, example = "0551")]
    pub phone: Option<Value>,
    /// Delivery address
    #[schema(value_type = String, example = "Algiers")]
    pub address: Option<Value>,
    /// Ordered item descriptions, one line each in the notification
    #[schema(value_type = Vec<String>, example = json!(["Shoe A", "Shoe B"]))]
    pub items: Option<Value>,
    /// Order total, number or text
    #[schema(value_type = f64, example = 4500)]
    pub total: Option<Value>,
}

// ============================================================================
// ValidatedOrder
// ============================================================================

/// Order total as it will appear in the notification.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderTotal {
    /// Numeric total, rendered without trailing zeros
    Amount(Decimal),
    /// Preformatted total supplied as text, rendered verbatim
    Text(String),
}

impl fmt::Display for OrderTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderTotal::Amount(d) => write!(f, "{}", d.normalize()),
            OrderTotal::Text(s) => f.write_str(s),
        }
    }
}

/// Order with every required field present and well formed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub items: Vec<String>,
    pub total: OrderTotal,
}

/// Check the submitted order field by field, in declaration order, and report
/// the first problem.
pub fn validate_order(req: OrderRequest) -> Result<ValidatedOrder, String> {
    let name = required_text("name", req.name)?;
    let phone = required_text("phone", req.phone)?;
    let address = required_text("address", req.address)?;
    let items = required_items(req.items)?;
    let total = required_total(req.total)?;

    Ok(ValidatedOrder {
        name,
        phone,
        address,
        items,
        total,
    })
}

fn required_text(field: &str, value: Option<Value>) -> Result<String, String> {
    match value {
        None => Err(format!("{} is required", field)),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Err(format!("{} must not be empty", field))
            } else {
                Ok(s.to_string())
            }
        }
        Some(_) => Err(format!("{} must be a string", field)),
    }
}

fn required_items(value: Option<Value>) -> Result<Vec<String>, String> {
    let items = match value {
        None => return Err("items is required".to_string()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err("items must be a list".to_string()),
    };
    if items.is_empty() {
        return Err("items must not be empty".to_string());
    }

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
            Value::String(_) => Err(format!("items[{}] must not be empty", i)),
            _ => Err(format!("items[{}] must be a string", i)),
        })
        .collect()
}

fn required_total(value: Option<Value>) -> Result<OrderTotal, String> {
    match value {
        None => Err("total is required".to_string()),
        Some(Value::Number(n)) => {
            let raw = n.to_string();
            let amount = Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|_| "total is not a valid amount".to_string())?;
            if amount.is_zero() {
                return Err("total must not be zero".to_string());
            }
            if amount.is_sign_negative() {
                return Err("total must not be negative".to_string());
            }
            Ok(OrderTotal::Amount(amount))
        }
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Err("total must not be empty".to_string())
            } else {
                Ok(OrderTotal::Text(s.to_string()))
            }
        }
        Some(_) => Err("total must be a number or a string".to_string()),
    }
}

// ============================================================================
// OrderPayload: Axum Framework Integration
// ============================================================================

/// JSON body extractor for order submissions.
///
/// Malformed bodies are reported with the same shape as field-level
/// validation failures.
#[derive(Debug)]
pub struct OrderPayload(pub OrderRequest);

impl<S> FromRequest<S> for OrderPayload
where
    S: Send + Sync,
{
    type Rejection = OrderError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(order) = Json::<OrderRequest>::from_request(req, state)
            .await
            .map_err(|e| OrderError::Validation(format!("Invalid JSON body: {}", e.body_text())))?;
        Ok(OrderPayload(order))
    }
}
