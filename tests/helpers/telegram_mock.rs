//! Mock Telegram API server for testing
//!
//! Provides a wiremock-backed stand-in for the Telegram Bot API so
//! handlers can be exercised end to end without a live bot connection.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "123:test_token";

/// Start a mock Telegram API server and a bot pointed at it
pub async fn mock_bot() -> (MockServer, Bot) {
    let server = MockServer::start().await;
    let api_url = server.uri().parse().expect("mock server uri is a valid url");
    let bot = Bot::new(TEST_TOKEN).set_api_url(api_url);
    (server, bot)
}

/// Path of a bot API method on the mock server. Method names are
/// PascalCase on the wire, e.g. `SendMessage`, `ForwardMessage`.
pub fn api_path(method: &str) -> String {
    format!("/bot{}/{}", TEST_TOKEN, method)
}

/// A successful method response carrying a message object
pub fn message_response(message_id: i32, chat_id: i64, text: &str) -> Value {
    let chat = if chat_id < 0 {
        json!({"id": chat_id, "type": "supergroup", "title": "Staff Channel"})
    } else {
        json!({"id": chat_id, "type": "private", "first_name": "Customer"})
    };

    json!({
        "ok": true,
        "result": {
            "message_id": message_id,
            "from": {
                "id": 42,
                "is_bot": true,
                "first_name": "FlowerBot",
                "username": "flower_bot"
            },
            "chat": chat,
            "date": 1700000000,
            "text": text
        }
    })
}
