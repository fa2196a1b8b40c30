//! Command handlers module
//!
//! This module contains handlers for all bot commands like /start, /order, etc.

pub mod start;
pub mod status;
pub mod order;
pub mod orders;
pub mod help;

use teloxide::{Bot, types::Message, utils::command::BotCommands};
use crate::config::Settings;
use crate::services::{ServiceFactory, notification::UNAVAILABLE_NOTICE};
use crate::state::DialogStore;
use crate::utils::errors::Result;
use crate::handlers::messages;
use teloxide::prelude::Requester;

/// All available bot commands
#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Команды FlowerBot:")]
pub enum Command {
    #[command(description = "Запустить бота и показать меню")]
    Start,
    #[command(description = "Проверить состояние сервисов")]
    Status,
    #[command(description = "Оформить заказ")]
    Order,
    #[command(description = "Показать мои заказы")]
    Orders,
    #[command(description = "Отменить оформление заказа")]
    Cancel,
    #[command(description = "Справка")]
    Help,
}

/// Main command dispatcher.
///
/// `/start` and `/status` are exempt from the availability gate so users
/// can always reach the menu and the status report. Everything else is
/// short-circuited with an unavailability notice while the backend is
/// down. While an order dialog is active, non-exempt command text is
/// consumed by the dialog, except `/cancel` (aborts) and `/order`
/// (restarts, overwriting the draft).
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    services: &ServiceFactory,
    settings: &Settings,
    dialogs: &DialogStore,
) -> Result<()> {
    match cmd {
        Command::Start => start::handle_start(bot, msg, services).await,
        Command::Status => status::handle_status(bot, msg, services, settings).await,
        Command::Order => {
            if !ensure_backend_available(&bot, &msg, services).await? {
                return Ok(());
            }
            order::handle_order_start(bot, msg, dialogs).await
        }
        Command::Cancel => {
            if !ensure_backend_available(&bot, &msg, services).await? {
                return Ok(());
            }
            order::handle_cancel(bot, msg, services, dialogs).await
        }
        Command::Orders => {
            if !ensure_backend_available(&bot, &msg, services).await? {
                return Ok(());
            }
            if messages::try_dialog_input(&bot, &msg, services, dialogs).await? {
                return Ok(());
            }
            orders::handle_orders(bot, msg, services).await
        }
        Command::Help => {
            if !ensure_backend_available(&bot, &msg, services).await? {
                return Ok(());
            }
            if messages::try_dialog_input(&bot, &msg, services, dialogs).await? {
                return Ok(());
            }
            help::handle_help(bot, msg).await
        }
    }
}

/// Availability gate for non-exempt commands. Sends the unavailability
/// notice and returns `Ok(false)` while the backend is down.
async fn ensure_backend_available(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
) -> Result<bool> {
    if services.availability.check().await {
        return Ok(true);
    }
    bot.send_message(msg.chat.id, UNAVAILABLE_NOTICE).await?;
    Ok(false)
}
