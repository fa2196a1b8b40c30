//! Status command handler
//!
//! Reports backend availability together with the bot configuration, the
//! way the original shop bot did. Exempt from the availability gate.

use teloxide::{Bot, types::{ChatId, Message}, prelude::Requester};
use tracing::debug;

use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

pub const STATUS_OK_TEXT: &str = "✅ Сервисы цветочного магазина доступны.";
pub const STATUS_DOWN_TEXT: &str =
    "⚠️ Сервисы временно недоступны. Наши специалисты уже работают над решением проблемы.";

/// Handle /status command with configuration details
pub async fn handle_status(
    bot: Bot,
    msg: Message,
    services: &ServiceFactory,
    settings: &Settings,
) -> Result<()> {
    debug!(chat_id = ?msg.chat.id, "Processing /status command");

    let available = services.availability.check().await;
    let config_info = format!(
        "\n🔧 Конфигурация бота:\n- WEBAPP_URL: {}\n- API_URL: {}",
        settings.bot.webapp_url, settings.backend.api_url
    );

    let text = if available {
        format!("{}{}", STATUS_OK_TEXT, config_info)
    } else {
        format!("{}{}", STATUS_DOWN_TEXT, config_info)
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Short status summary for the menu button, without configuration details
pub async fn send_status_summary(bot: &Bot, chat_id: ChatId, services: &ServiceFactory) -> Result<()> {
    let available = services.availability.check().await;
    let text = if available { STATUS_OK_TEXT } else { STATUS_DOWN_TEXT };
    bot.send_message(chat_id, text).await?;
    Ok(())
}
