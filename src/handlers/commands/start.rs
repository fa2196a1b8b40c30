//! Start command handler
//!
//! Handles the /start command: best-effort registration with the backend
//! and the main menu with the catalog web-app button. Exempt from the
//! availability gate so the menu is reachable during backend outages.

use teloxide::{Bot, types::Message};
use tracing::{debug, info, warn};

use crate::services::{ServiceFactory, TelegramRegisterRequest, RegistrationOutcome};
use crate::services::notification::WELCOME_TEXT;
use crate::utils::errors::{FlowerBotError, Result};
use crate::utils::logging::log_user_action;

/// Handle /start command - main entry point for customers
pub async fn handle_start(_bot: Bot, msg: Message, services: &ServiceFactory) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        FlowerBotError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    debug!(user_id = user_id, chat_id = ?msg.chat.id, "Processing /start command");

    // Registration must never block the welcome; the backend may be down
    // and /start is exempt from the gate.
    let request = TelegramRegisterRequest {
        telegram_id: user_id,
        first_name: Some(user.first_name.clone()),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
    };
    match services.backend.register_user(&request).await {
        Ok(RegistrationOutcome::Registered) => {
            info!(user_id = user_id, "User registered with backend");
        }
        Ok(RegistrationOutcome::AlreadyRegistered) => {
            debug!(user_id = user_id, "User already registered with backend");
        }
        Err(e) => {
            warn!(user_id = user_id, error = %e, "Backend registration failed, continuing");
        }
    }

    services.notifications.send_menu(msg.chat.id, WELCOME_TEXT).await?;
    log_user_action(user_id, "start", None);

    Ok(())
}
