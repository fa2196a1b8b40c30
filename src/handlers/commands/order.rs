//! Order dialog commands
//!
//! /order starts (or restarts) the guided order dialog; /cancel aborts it.

use teloxide::{Bot, types::Message, prelude::Requester};
use tracing::{debug, info};

use crate::services::ServiceFactory;
use crate::services::notification::{DIALOG_CANCELLED_TEXT, MENU_FALLBACK_TEXT, NOTHING_TO_CANCEL_TEXT};
use crate::state::DialogStore;
use crate::state::dialog::DESCRIPTION_PROMPT;
use crate::utils::errors::{FlowerBotError, Result};

/// Start a new order dialog. An active dialog is overwritten: a new order
/// discards the previous draft without error.
pub async fn handle_order_start(bot: Bot, msg: Message, dialogs: &DialogStore) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        FlowerBotError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    info!(user_id = user_id, "Starting order dialog");

    dialogs.begin(user_id, user.full_name()).await;
    bot.send_message(msg.chat.id, DESCRIPTION_PROMPT).await?;

    Ok(())
}

/// Cancel the active order dialog, if any
pub async fn handle_cancel(
    bot: Bot,
    msg: Message,
    services: &ServiceFactory,
    dialogs: &DialogStore,
) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        FlowerBotError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;

    if dialogs.cancel(user_id).await {
        debug!(user_id = user_id, "Order dialog cancelled by command");
        bot.send_message(msg.chat.id, DIALOG_CANCELLED_TEXT).await?;
        services.notifications.send_menu(msg.chat.id, MENU_FALLBACK_TEXT).await?;
    } else {
        bot.send_message(msg.chat.id, NOTHING_TO_CANCEL_TEXT).await?;
    }

    Ok(())
}
