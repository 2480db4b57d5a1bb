//! Gateway types module
//!
//! ## Input Types
//! - [`OrderRequest`]: raw order body
//! - [`ValidatedOrder`]: order after field validation
//! - [`OrderPayload`]: Axum extractor for the order body
//!
//! ## Output Types
//! - [`OrderAck`], [`ErrorResponse`]: `/send-order` responses
//! - [`RootStatus`], [`HealthStatus`]: liveness responses

pub mod order;
pub mod response;

pub use order::{OrderPayload, OrderRequest, OrderTotal, ValidatedOrder, validate_order};
pub use response::{ErrorResponse, HealthStatus, OrderAck, RootStatus};
