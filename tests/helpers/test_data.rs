//! Test data helpers for creating test objects
//!
//! This module provides helper functions for creating test Telegram
//! messages, users, and chats without a live bot connection.

use chrono::Utc;
use teloxide::types::{
    Chat, ChatId, ChatKind, ChatPrivate, ChatPublic, MediaKind, MediaText, Message,
    MessageCommon, MessageId, MessageKind, MessageOrigin, PublicChatKind, PublicChatSupergroup,
    User, UserId,
};

/// Helper function to create a test Telegram user
pub fn create_test_user(user_id: i64, first_name: &str, username: Option<&str>) -> User {
    User {
        id: UserId(user_id as u64),
        is_bot: false,
        first_name: first_name.to_string(),
        last_name: None,
        username: username.map(|s| s.to_string()),
        language_code: Some("ru".to_string()),
        is_premium: false,
        added_to_attachment_menu: false,
    }
}

/// Helper function to create a test private chat
pub fn create_test_private_chat(chat_id: i64) -> Chat {
    Chat {
        id: ChatId(chat_id),
        kind: ChatKind::Private(ChatPrivate {
            username: None,
            first_name: Some("TestUser".to_string()),
            last_name: None,
        }),
    }
}

/// Helper function to create a test group chat, e.g. the staff channel
pub fn create_test_group_chat(chat_id: i64, title: &str) -> Chat {
    Chat {
        id: ChatId(chat_id),
        kind: ChatKind::Public(ChatPublic {
            title: Some(title.to_string()),
            kind: PublicChatKind::Supergroup(PublicChatSupergroup {
                username: None,
                is_forum: false,
            }),
        }),
    }
}

/// Helper function to create a test text message
pub fn create_test_message(user_id: i64, chat_id: i64, text: &str) -> Message {
    let user = create_test_user(user_id, "TestUser", Some("testuser"));
    let chat = if chat_id > 0 {
        create_test_private_chat(chat_id)
    } else {
        create_test_group_chat(chat_id, "Staff Channel")
    };

    Message {
        id: MessageId(1),
        thread_id: None,
        from: Some(user),
        sender_chat: None,
        sender_business_bot: None,
        date: Utc::now(),
        chat,
        is_topic_message: false,
        via_bot: None,
        kind: MessageKind::Common(MessageCommon {
            author_signature: None,
            forward_origin: None,
            external_reply: None,
            quote: None,
            reply_to_story: None,
            edit_date: None,
            media_kind: MediaKind::Text(MediaText {
                text: text.to_string(),
                entities: vec![],
                link_preview_options: None,
            }),
            reply_markup: None,
            effect_id: None,
            reply_to_message: None,
            sender_boost_count: None,
            is_automatic_forward: false,
            has_protected_content: false,
            is_from_offline: false,
            business_connection_id: None,
        }),
    }
}

/// A message with a specific message id, for reply-link correlation tests
pub fn with_message_id(mut msg: Message, message_id: i32) -> Message {
    msg.id = MessageId(message_id);
    msg
}

/// A message carrying forward-origin metadata pointing at a customer
pub fn with_forward_origin(mut msg: Message, origin_user_id: i64) -> Message {
    if let MessageKind::Common(ref mut common) = msg.kind {
        common.forward_origin = Some(MessageOrigin::User {
            date: Utc::now(),
            sender_user: create_test_user(origin_user_id, "Customer", None),
        });
    }
    msg
}

/// A staff-channel message replying to another message
pub fn create_staff_reply(
    staff_chat_id: i64,
    reply_target: Message,
    text: &str,
) -> Message {
    let mut msg = create_test_message(999, staff_chat_id, text);
    if let MessageKind::Common(ref mut common) = msg.kind {
        common.reply_to_message = Some(Box::new(reply_target));
    }
    msg.id = MessageId(500);
    msg
}
