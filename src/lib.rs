//! Order Relay - storefront order intake over HTTP, delivered by email
//!
//! # Modules
//!
//! - [`config`] - YAML + environment configuration, validated at startup
//! - [`logging`] - tracing subscriber setup
//! - [`gateway`] - HTTP router, handlers, order service and error mapping
//! - [`notification`] - Arabic plain-text / HTML email rendering
//! - [`mail`] - Mail Transport seam and the SMTP implementation
//! - [`keepalive`] - periodic self-ping for idle-prone hosting

pub mod config;
pub mod gateway;
pub mod keepalive;
pub mod logging;
pub mod mail;
pub mod notification;

// Convenient re-exports at crate root
pub use config::{AppConfig, ConfigError};
pub use gateway::error::{OrderError, OrderErrorCode};
pub use gateway::services::OrderService;
pub use gateway::state::AppState;
pub use keepalive::KeepAliveProber;
pub use mail::{DeliveryError, DeliveryReceipt, Envelope, MailTransport, SmtpMailTransport};
pub use notification::OrderNotification;
