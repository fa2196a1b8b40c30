//! Orders command handler
//!
//! Lists the customer's existing orders via the backend API.

use teloxide::{Bot, types::Message, prelude::Requester};
use tracing::{debug, warn};

use crate::services::ServiceFactory;
use crate::services::notification::{format_order_list, UNAVAILABLE_NOTICE};
use crate::utils::errors::{FlowerBotError, Result};

/// Handle /orders command and the "📦 Мои заказы" menu action
pub async fn handle_orders(bot: Bot, msg: Message, services: &ServiceFactory) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        FlowerBotError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;

    debug!(user_id = user_id, "Fetching order list");

    match services.backend.list_orders(user_id).await {
        Ok(orders) => {
            bot.send_message(msg.chat.id, format_order_list(&orders)).await?;
        }
        Err(e) => {
            warn!(user_id = user_id, error = %e, "Failed to fetch orders from backend");
            bot.send_message(msg.chat.id, UNAVAILABLE_NOTICE).await?;
        }
    }

    Ok(())
}
