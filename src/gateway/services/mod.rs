//! Gateway Services Layer
//!
//! Business logic extracted from handlers. Handlers are thin HTTP adapters
//! that delegate here.

pub mod order;

pub use order::OrderService;
