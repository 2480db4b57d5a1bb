//! OpenAPI documentation
//!
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`
//! - Offline export: `cargo run --bin export_openapi`

use utoipa::OpenApi;

use crate::gateway::types::{ErrorResponse, HealthStatus, OrderAck, OrderRequest, RootStatus};

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Order Relay API",
        version = "0.1.0",
        description = "Accepts storefront orders and relays them to the shop mailbox by email.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::order::send_order,
        crate::gateway::handlers::health::root_status,
        crate::gateway::handlers::health::health_check,
    ),
    components(
        schemas(
            OrderRequest,
            OrderAck,
            ErrorResponse,
            RootStatus,
            HealthStatus,
        )
    ),
    tags(
        (name = "Orders", description = "Order submission"),
        (name = "System", description = "Liveness probes")
    )
)]
pub struct ApiDoc;
