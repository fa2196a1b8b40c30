//! State management module
//!
//! This module holds the per-user order dialog state machine, the
//! in-memory dialog store, and staff reply correlation.

pub mod dialog;
pub mod store;
pub mod reply_links;

// Re-export commonly used state components
pub use dialog::{DialogOutcome, DialogStep, OrderDialog};
pub use store::DialogStore;
pub use reply_links::{ReplyLinkStore, extract_customer_id};
