use std::sync::Arc;
use std::time::Instant;

use super::services::OrderService;

/// Gateway application state (shared, read-only)
pub struct AppState {
    /// Order intake pipeline
    pub orders: Arc<OrderService>,
    /// Shop name shown on the root liveness probe
    pub shop_name: String,
    started_at: Instant,
}

impl AppState {
    pub fn new(orders: Arc<OrderService>, shop_name: impl Into<String>) -> Self {
        Self {
            orders,
            shop_name: shop_name.into(),
            started_at: Instant::now(),
        }
    }

    /// Seconds since the state was built, i.e. since the server started.
    pub fn uptime_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}
