//! Bot handlers module
//!
//! This module contains all Telegram bot handlers organized by type:
//! - Command handlers for bot commands
//! - Message handlers for text, menu actions and web-app payloads

pub mod commands;
pub mod messages;

// Re-export commonly used handler functions
pub use commands::{Command, handle_command};
pub use messages::{handle_message, handle_web_app_data};
