//! Data models module
//!
//! Domain structures shared across services and handlers.

pub mod order;

pub use order::{OrderDraft, OrderRecord, generate_order_id};
