//! Message router
//!
//! Classifies each inbound text message and dispatches it: staff-channel
//! replies, active dialog input, menu vocabulary, or free-text escalation
//! to the staff channel. Also handles structured web-app order payloads.

use teloxide::{
    Bot,
    prelude::Requester,
    types::{Message, MessageOrigin},
};
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::services::ServiceFactory;
use crate::services::notification::{
    customer_confirmation, staff_reply_text,
    CORRELATION_FAILURE_NOTICE, DIALOG_CANCELLED_TEXT, ESCALATION_ACK, MENU_FALLBACK_TEXT,
    PROCESSING_ERROR_TEXT, STAFF_REPLY_ACK, UNAVAILABLE_NOTICE,
};
use crate::state::{DialogOutcome, DialogStore, ReplyLinkStore, extract_customer_id};
use crate::utils::errors::{FlowerBotError, Result};
use crate::utils::helpers::truncate_text;
use crate::utils::logging::log_staff_relay;
use crate::handlers::commands::{help, orders, status};
use crate::models::order::OrderDraft;

pub const MENU_NEW_ORDER: &str = "🌸 Оформить заказ";
pub const MENU_CONTACT_STAFF: &str = "💬 Связаться с менеджером";
pub const MENU_MY_ORDERS: &str = "📦 Мои заказы";
pub const MENU_SYSTEM_STATUS: &str = "📊 Статус системы";
pub const MENU_HELP: &str = "❓ Помощь";

const CONTACT_STAFF_TEXT: &str =
    "Напишите ваш вопрос одним сообщением, и мы передадим его менеджеру. \
     Также вы можете позвонить нам по телефону: +7 (XXX) XXX-XX-XX";

/// Handle incoming text messages
pub async fn handle_message(
    bot: Bot,
    msg: Message,
    services: &ServiceFactory,
    settings: &Settings,
    dialogs: &DialogStore,
    links: &ReplyLinkStore,
) -> Result<()> {
    // Non-text updates pass through untouched
    let Some(text) = msg.text() else {
        return Ok(());
    };

    // Staff channel traffic is never gated: relaying a reply does not
    // touch the backend
    if msg.chat.id.0 == settings.bot.staff_chat_id {
        return handle_staff_message(bot, &msg, services, links).await;
    }

    // Group chatter outside the staff channel is not ours to answer
    if !msg.chat.id.is_user() {
        return Ok(());
    }

    let user = msg.from.as_ref().ok_or_else(|| {
        FlowerBotError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;

    debug!(user_id = user_id, "Processing message");

    // Availability gate for all customer traffic except the exempt
    // commands, which are routed before this handler
    if !services.availability.check().await {
        bot.send_message(msg.chat.id, UNAVAILABLE_NOTICE).await?;
        return Ok(());
    }

    // An active dialog consumes the whole message, menu matching included
    if try_dialog_input(&bot, &msg, services, dialogs).await? {
        return Ok(());
    }

    match text {
        MENU_NEW_ORDER => {
            dialogs.begin(user_id, user.full_name()).await;
            info!(user_id = user_id, "Starting order dialog from menu");
            bot.send_message(msg.chat.id, crate::state::dialog::DESCRIPTION_PROMPT).await?;
            Ok(())
        }
        MENU_CONTACT_STAFF => {
            bot.send_message(msg.chat.id, CONTACT_STAFF_TEXT).await?;
            Ok(())
        }
        MENU_MY_ORDERS => orders::handle_orders(bot, msg, services).await,
        MENU_SYSTEM_STATUS => status::send_status_summary(&bot, msg.chat.id, services).await,
        MENU_HELP => help::handle_help(bot, msg).await,
        _ => escalate_to_staff(bot, &msg, services, user_id).await,
    }
}

/// Feed a message to the user's active dialog if one exists.
///
/// Returns `Ok(true)` when the message was consumed by a dialog.
pub async fn try_dialog_input(
    bot: &Bot,
    msg: &Message,
    services: &ServiceFactory,
    dialogs: &DialogStore,
) -> Result<bool> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(false);
    };
    let user_id = user.id.0 as i64;
    let Some(text) = msg.text() else {
        return Ok(false);
    };

    let Some(outcome) = dialogs.advance(user_id, text).await else {
        return Ok(false);
    };

    match outcome {
        DialogOutcome::Prompt(prompt) => {
            bot.send_message(msg.chat.id, prompt).await?;
        }
        DialogOutcome::Cancelled => {
            info!(user_id = user_id, "Order dialog cancelled");
            bot.send_message(msg.chat.id, DIALOG_CANCELLED_TEXT).await?;
            services.notifications.send_menu(msg.chat.id, MENU_FALLBACK_TEXT).await?;
        }
        DialogOutcome::Completed(draft) => {
            deliver_completed_order(services, &draft).await;
        }
    }

    Ok(true)
}

/// Deliver a submitted order: staff notification and customer
/// confirmation are independent sends. Failure of one is logged, never
/// rolls back the other, and never resurrects the dialog state, which is
/// already gone - order emission is at-most-once.
async fn deliver_completed_order(services: &ServiceFactory, draft: &OrderDraft) {
    let order_id = draft.order_id.as_deref().unwrap_or("—").to_string();
    info!(user_id = draft.telegram_id, order_id = %order_id, "Order submitted");

    if let Err(e) = services.notifications.notify_staff_order(draft).await {
        error!(user_id = draft.telegram_id, order_id = %order_id, error = %e,
               "Failed to deliver order notification to staff channel");
    }

    if let Err(e) = services.notifications
        .send_to_customer(draft.telegram_id, customer_confirmation(draft))
        .await
    {
        error!(user_id = draft.telegram_id, order_id = %order_id, error = %e,
               "Failed to deliver order confirmation to customer");
    }
}

/// Forward unmatched private-chat text to the staff channel. The customer
/// gets an acknowledgment; if forwarding itself fails the menu is
/// re-presented instead.
async fn escalate_to_staff(
    bot: Bot,
    msg: &Message,
    services: &ServiceFactory,
    user_id: i64,
) -> Result<()> {
    let preview = truncate_text(msg.text().unwrap_or_default(), 64);
    debug!(user_id = user_id, text = %preview, "Escalating message to staff channel");

    match services.notifications.relay_to_staff(msg, user_id).await {
        Ok(_) => {
            bot.send_message(msg.chat.id, ESCALATION_ACK).await?;
        }
        Err(e) => {
            warn!(user_id = user_id, error = %e, "Failed to forward message to staff channel");
            services.notifications.send_menu(msg.chat.id, MENU_FALLBACK_TEXT).await?;
        }
    }

    Ok(())
}

/// Handle a message posted in the staff channel.
///
/// Only replies are meaningful: the replied-to message identifies the
/// customer. Anything else in the staff channel is internal chatter.
async fn handle_staff_message(
    bot: Bot,
    msg: &Message,
    services: &ServiceFactory,
    links: &ReplyLinkStore,
) -> Result<()> {
    let Some(reply_target) = msg.reply_to_message() else {
        return Ok(());
    };
    let Some(reply_body) = msg.text() else {
        return Ok(());
    };

    let Some(customer_id) = resolve_customer(links, reply_target).await else {
        warn!(message_id = msg.id.0, "Staff reply could not be correlated to a customer");
        bot.send_message(msg.chat.id, CORRELATION_FAILURE_NOTICE).await?;
        return Ok(());
    };

    match services.notifications
        .send_to_customer(customer_id, staff_reply_text(reply_body))
        .await
    {
        Ok(_) => {
            log_staff_relay(customer_id, "staff_to_customer", true);
            bot.send_message(msg.chat.id, STAFF_REPLY_ACK).await?;
        }
        Err(e) => {
            log_staff_relay(customer_id, "staff_to_customer", false);
            bot.send_message(
                msg.chat.id,
                format!("⚠️ Не удалось доставить ответ клиенту {}: {}", customer_id, e),
            )
            .await?;
        }
    }

    Ok(())
}

/// Recover the customer behind a staff-channel message, in order of
/// preference: the reply-link map recorded at send time, the
/// `Telegram ID:` marker in the message text, and finally the platform's
/// forward-origin metadata.
pub async fn resolve_customer(links: &ReplyLinkStore, reply_target: &Message) -> Option<i64> {
    if let Some(customer_id) = links.lookup(reply_target.id.0).await {
        return Some(customer_id);
    }

    if let Some(text) = reply_target.text() {
        if let Some(customer_id) = extract_customer_id(text) {
            return Some(customer_id);
        }
    }

    if let Some(MessageOrigin::User { sender_user, .. }) = reply_target.forward_origin() {
        return Some(sender_user.id.0 as i64);
    }

    None
}

/// Handle structured order payloads from the catalog web app.
///
/// A malformed payload gets a generic processing-error reply and leaves
/// any dialog state untouched.
pub async fn handle_web_app_data(
    bot: Bot,
    msg: Message,
    services: &ServiceFactory,
) -> Result<()> {
    if !services.availability.check().await {
        bot.send_message(
            msg.chat.id,
            "⚠️ Извините, сервис временно недоступен. Пожалуйста, попробуйте оформить заказ позже.",
        )
        .await?;
        return Ok(());
    }

    let Some(data) = msg.web_app_data() else {
        return Ok(());
    };

    let reply = match parse_web_app_order(&data.data) {
        Some(order_id) => {
            info!(order_id = %order_id, "Web app order received");
            format!("Спасибо за заказ! Номер заказа: {}", order_id)
        }
        None => {
            warn!(payload = %truncate_text(&data.data, 128), "Malformed web app payload");
            PROCESSING_ERROR_TEXT.to_string()
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Extract the order id from a web-app payload like `{"orderId": "..."}`
fn parse_web_app_order(raw: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let order_id = value.get("orderId")?;
    match order_id.as_str() {
        Some(s) => Some(s.to_string()),
        None if order_id.is_number() => Some(order_id.to_string()),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_web_app_order_string_id() {
        assert_eq!(
            parse_web_app_order(r#"{"orderId": "T20240115-042"}"#),
            Some("T20240115-042".to_string())
        );
    }

    #[test]
    fn test_parse_web_app_order_numeric_id() {
        assert_eq!(parse_web_app_order(r#"{"orderId": 42}"#), Some("42".to_string()));
    }

    #[test]
    fn test_parse_web_app_order_malformed() {
        assert_eq!(parse_web_app_order("not json"), None);
        assert_eq!(parse_web_app_order(r#"{"something": "else"}"#), None);
        assert_eq!(parse_web_app_order(r#"{"orderId": null}"#), None);
    }

    #[test]
    fn test_menu_vocabulary_is_distinct() {
        let entries = [
            MENU_NEW_ORDER,
            MENU_CONTACT_STAFF,
            MENU_MY_ORDERS,
            MENU_SYSTEM_STATUS,
            MENU_HELP,
        ];
        for (i, a) in entries.iter().enumerate() {
            for b in entries.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
