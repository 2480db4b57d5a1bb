pub mod health;
pub mod order;

pub use health::{health_check, root_status};
pub use order::send_order;
