//! Notification service implementation
//!
//! Message formatting and delivery: customer confirmations, staff-channel
//! order notifications and escalations, the main menu keyboard, and the
//! reply-link bookkeeping that makes staff replies routable back to the
//! customer.

use teloxide::{
    Bot,
    payloads::SendMessageSetters,
    prelude::Requester,
    types::{ButtonRequest, ChatId, KeyboardButton, KeyboardMarkup, Message, ReplyMarkup, WebAppInfo},
};
use tracing::{debug, info};

use crate::config::settings::Settings;
use crate::models::order::{OrderDraft, OrderRecord};
use crate::state::reply_links::ReplyLinkStore;
use crate::utils::errors::{FlowerBotError, Result};
use crate::utils::helpers::format_timestamp;

pub const WELCOME_TEXT: &str =
    "Добро пожаловать в цветочный магазин! Выберите действие:";
pub const MENU_FALLBACK_TEXT: &str =
    "Выберите действие в меню или посетите наш магазин";
pub const UNAVAILABLE_NOTICE: &str =
    "⚠️ Сервис временно недоступен. Пожалуйста, попробуйте позже или используйте /status для проверки состояния.";
pub const ESCALATION_ACK: &str =
    "✅ Ваше сообщение передано менеджеру. Мы ответим в ближайшее время.";
pub const CORRELATION_FAILURE_NOTICE: &str =
    "⚠️ Не удалось определить, какому клиенту адресован этот ответ. Ответьте на сообщение бота с пометкой Telegram ID.";
pub const STAFF_REPLY_ACK: &str = "✅ Ответ отправлен клиенту.";
pub const STAFF_REPLY_PREFIX: &str = "📝 Ответ от менеджера: ";
pub const PROCESSING_ERROR_TEXT: &str =
    "Произошла ошибка при обработке заказа. Пожалуйста, попробуйте позже.";
pub const DIALOG_CANCELLED_TEXT: &str = "❌ Оформление заказа отменено.";
pub const NOTHING_TO_CANCEL_TEXT: &str = "Сейчас нет активного оформления заказа.";

/// Customer-facing confirmation for a submitted order
pub fn customer_confirmation(draft: &OrderDraft) -> String {
    format!(
        "Спасибо за заказ! Номер заказа: {}\nНаш менеджер свяжется с вами для подтверждения.",
        draft.order_id.as_deref().unwrap_or("—")
    )
}

/// Staff-facing notification with the full draft and a parseable identity
/// marker (`Telegram ID: <n>`), the text-level fallback for correlation.
pub fn staff_notification(draft: &OrderDraft) -> String {
    let submitted = draft.submitted_at.map(format_timestamp).unwrap_or_default();
    format!(
        "🆕 Новый заказ {id}\n\
         Клиент: {name}\n\
         Telegram ID: {telegram_id}\n\
         📋 Описание: {description}\n\
         📞 Телефон: {phone}\n\
         🏠 Адрес: {address}\n\
         💬 Комментарий: {comment}\n\
         🕒 Оформлен: {submitted}",
        id = draft.order_id.as_deref().unwrap_or("—"),
        name = draft.display_name,
        telegram_id = draft.telegram_id,
        description = draft.description.as_deref().unwrap_or("—"),
        phone = draft.phone.as_deref().unwrap_or("—"),
        address = draft.address.as_deref().unwrap_or("—"),
        comment = draft.comment.as_deref().unwrap_or("—"),
        submitted = submitted,
    )
}

/// Text delivered to the customer for a staff reply
pub fn staff_reply_text(reply: &str) -> String {
    format!("{}{}", STAFF_REPLY_PREFIX, reply)
}

/// Customer-facing order listing
pub fn format_order_list(orders: &[OrderRecord]) -> String {
    if orders.is_empty() {
        return "📦 У вас пока нет заказов.".to_string();
    }

    let mut text = String::from("📦 Ваши заказы:\n");
    for order in orders {
        text.push_str(&format!(
            "• №{} — статус {}, сумма {:.2} ₽, от {}\n",
            order.id, order.status_id, order.total_amount, order.created_at
        ));
    }
    text
}

/// Delivery side of the bot: everything outbound goes through here
#[derive(Debug, Clone)]
pub struct NotificationService {
    bot: Bot,
    settings: Settings,
    reply_links: ReplyLinkStore,
}

impl NotificationService {
    pub fn new(bot: Bot, settings: Settings, reply_links: ReplyLinkStore) -> Self {
        Self { bot, settings, reply_links }
    }

    fn staff_chat(&self) -> ChatId {
        ChatId(self.settings.bot.staff_chat_id)
    }

    /// Send plain text directly to a customer
    pub async fn send_to_customer(&self, customer_id: i64, text: impl Into<String>) -> Result<Message> {
        let message = self.bot.send_message(ChatId(customer_id), text.into()).await?;
        Ok(message)
    }

    /// Send plain text to the staff channel
    pub async fn send_to_staff(&self, text: impl Into<String>) -> Result<Message> {
        let message = self.bot.send_message(self.staff_chat(), text.into()).await?;
        Ok(message)
    }

    /// Post a submitted order to the staff channel and remember which
    /// customer the notification concerns
    pub async fn notify_staff_order(&self, draft: &OrderDraft) -> Result<Message> {
        let message = self.send_to_staff(staff_notification(draft)).await?;
        self.reply_links.record(message.id.0, draft.telegram_id).await;
        info!(
            user_id = draft.telegram_id,
            order_id = draft.order_id.as_deref(),
            "Order notification delivered to staff channel"
        );
        Ok(message)
    }

    /// Forward a customer's free-text message to the staff channel as an
    /// escalation, keeping it correlatable for a later staff reply
    pub async fn relay_to_staff(&self, msg: &Message, customer_id: i64) -> Result<Message> {
        let forwarded = self.bot
            .forward_message(self.staff_chat(), msg.chat.id, msg.id)
            .await?;
        self.reply_links.record(forwarded.id.0, customer_id).await;
        debug!(customer_id = customer_id, "Customer message forwarded to staff channel");
        Ok(forwarded)
    }

    /// Send the main menu with the catalog web-app button
    pub async fn send_menu(&self, chat_id: ChatId, text: &str) -> Result<Message> {
        let keyboard = self.menu_keyboard()?;
        let message = self.bot
            .send_message(chat_id, text)
            .reply_markup(ReplyMarkup::Keyboard(keyboard))
            .await?;
        Ok(message)
    }

    fn menu_keyboard(&self) -> Result<KeyboardMarkup> {
        let catalog_url = url::Url::parse(&self.settings.bot.webapp_url)
            .map_err(FlowerBotError::UrlParse)?;

        Ok(KeyboardMarkup::new(vec![
            vec![KeyboardButton::new("🌹 Открыть каталог")
                .request(ButtonRequest::WebApp(WebAppInfo { url: catalog_url }))],
            vec![
                KeyboardButton::new(crate::handlers::messages::MENU_NEW_ORDER),
                KeyboardButton::new(crate::handlers::messages::MENU_CONTACT_STAFF),
            ],
            vec![
                KeyboardButton::new(crate::handlers::messages::MENU_MY_ORDERS),
                KeyboardButton::new(crate::handlers::messages::MENU_SYSTEM_STATUS),
            ],
            vec![KeyboardButton::new(crate::handlers::messages::MENU_HELP)],
        ])
        .resize_keyboard())
    }
}
