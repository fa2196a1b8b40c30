//! FlowerBot Telegram Bot
//!
//! Telegram front end for a flower shop. This library provides modular
//! components for the guided order dialog, message escalation to the
//! staff channel, staff reply relaying, backend availability probing and
//! the backend API client.

#![allow(non_snake_case)]

pub mod config;
pub mod handlers;
pub mod services;
pub mod models;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{FlowerBotError, Result};

// Re-export main components for easy access
pub use services::ServiceFactory;
pub use state::{DialogStore, ReplyLinkStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
