//! Staff reply correlation tests
//!
//! Covers the fallback chain used to find the customer behind a staff
//! reply: the reply-link map, the id marker in the message text, then
//! the forward-origin metadata.

mod helpers;

use helpers::test_data::{
    create_staff_reply, create_test_message, with_forward_origin, with_message_id,
};

use FlowerBot::handlers::messages::resolve_customer;
use FlowerBot::models::order::OrderDraft;
use FlowerBot::services::notification::staff_notification;
use FlowerBot::state::{ReplyLinkStore, extract_customer_id};

const STAFF_CHAT: i64 = -1001234567890;

#[tokio::test]
async fn test_link_map_is_preferred() {
    let links = ReplyLinkStore::new();
    links.record(42, 111).await;

    // The text carries a different id; the recorded link must win
    let target = with_message_id(
        create_test_message(999, STAFF_CHAT, "Telegram ID: 222"),
        42,
    );

    assert_eq!(resolve_customer(&links, &target).await, Some(111));
}

#[tokio::test]
async fn test_marker_fallback_when_link_missing() {
    let links = ReplyLinkStore::new();

    let target = with_message_id(
        create_test_message(999, STAFF_CHAT, "🌸 Новый заказ\nTelegram ID: 333\nТелефон: +7"),
        42,
    );

    assert_eq!(resolve_customer(&links, &target).await, Some(333));
}

#[tokio::test]
async fn test_forward_origin_fallback() {
    let links = ReplyLinkStore::new();

    let target = with_forward_origin(
        create_test_message(999, STAFF_CHAT, "forwarded customer question"),
        444,
    );

    assert_eq!(resolve_customer(&links, &target).await, Some(444));
}

#[tokio::test]
async fn test_uncorrelatable_message_resolves_to_none() {
    let links = ReplyLinkStore::new();
    let target = create_test_message(999, STAFF_CHAT, "internal chatter, no ids here");

    assert_eq!(resolve_customer(&links, &target).await, None);
}

#[tokio::test]
async fn test_reply_target_is_taken_from_the_replied_message() {
    let links = ReplyLinkStore::new();
    links.record(42, 111).await;

    let notification = with_message_id(
        create_test_message(999, STAFF_CHAT, "🌸 Новый заказ"),
        42,
    );
    let staff_reply = create_staff_reply(STAFF_CHAT, notification, "Ваш заказ готов!");

    let target = staff_reply.reply_to_message().expect("fixture carries a reply target");
    assert_eq!(resolve_customer(&links, target).await, Some(111));
}

#[tokio::test]
async fn test_staff_notification_round_trips_through_marker() {
    let links = ReplyLinkStore::new();
    let draft = OrderDraft::new(555, "Анна");
    let text = staff_notification(&draft);

    assert_eq!(extract_customer_id(&text), Some(555));

    // Same text pasted into a reply target without a recorded link
    let target = create_test_message(999, STAFF_CHAT, &text);
    assert_eq!(resolve_customer(&links, &target).await, Some(555));
}
