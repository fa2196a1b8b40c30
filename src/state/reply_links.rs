//! Staff reply correlation
//!
//! Associates staff-channel messages with the customer they concern. The
//! primary mechanism is an explicit map recorded at send time; parsing the
//! `Telegram ID:` marker out of the replied-to text is kept as a fallback
//! for messages the map never saw, e.g. notifications sent before a
//! restart.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use regex::Regex;
use tokio::sync::Mutex;
use tracing::debug;

/// Labeled field embedded in staff-facing notifications
pub const ID_MARKER_LABEL: &str = "Telegram ID";

/// Oldest links are evicted past this size; staff replies to evicted
/// notifications still resolve through the text-marker fallback.
const MAX_LINKS: usize = 1024;

#[derive(Debug, Default)]
struct Links {
    by_message: HashMap<i32, i64>,
    insertion_order: VecDeque<i32>,
}

/// Map from staff-channel message id to the customer's Telegram id
#[derive(Debug, Clone, Default)]
pub struct ReplyLinkStore {
    inner: Arc<Mutex<Links>>,
}

impl ReplyLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember which customer a staff-channel message concerns
    pub async fn record(&self, message_id: i32, customer_id: i64) {
        let mut links = self.inner.lock().await;
        if links.by_message.insert(message_id, customer_id).is_none() {
            links.insertion_order.push_back(message_id);
        }
        while links.insertion_order.len() > MAX_LINKS {
            if let Some(oldest) = links.insertion_order.pop_front() {
                links.by_message.remove(&oldest);
            }
        }
        debug!(message_id = message_id, customer_id = customer_id, "Reply link recorded");
    }

    /// Look up the customer behind a staff-channel message
    pub async fn lookup(&self, message_id: i32) -> Option<i64> {
        let links = self.inner.lock().await;
        links.by_message.get(&message_id).copied()
    }
}

/// Extract the customer id from the `Telegram ID: <n>` marker embedded in
/// a staff notification's text. Returns `None` when no marker is present.
pub fn extract_customer_id(text: &str) -> Option<i64> {
    let pattern = Regex::new(r"Telegram ID:\s*(\d+)").ok()?;
    let captures = pattern.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}
