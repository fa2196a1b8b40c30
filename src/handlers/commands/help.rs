//! Help command handler

use teloxide::{Bot, types::Message, prelude::Requester};

use crate::utils::errors::Result;

const HELP_TEXT: &str = "🌸 Бот цветочного магазина\n\n\
    /start — главное меню и каталог\n\
    /order — оформить заказ в чате\n\
    /orders — показать мои заказы\n\
    /status — состояние сервисов\n\
    /cancel — отменить оформление заказа\n\n\
    Любое другое сообщение будет передано менеджеру.";

/// Handle /help command and the "❓ Помощь" menu action
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    bot.send_message(msg.chat.id, HELP_TEXT).await?;
    Ok(())
}
