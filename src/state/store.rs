//! In-memory dialog state store
//!
//! Maps a Telegram user id to that user's active order dialog. An injected
//! store object rather than a module-level global, so handlers can be
//! tested in isolation. State does not survive a restart.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use super::dialog::{DialogOutcome, OrderDialog};

/// Shared per-user dialog store.
///
/// Each inbound message mutates its user's entry under a single lock
/// acquisition with no await inside, so a message's state transition is
/// atomic. Two messages from the same user racing between handler
/// invocations remain an accepted hazard.
#[derive(Debug, Clone, Default)]
pub struct DialogStore {
    inner: Arc<Mutex<HashMap<i64, OrderDialog>>>,
}

impl DialogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a dialog for a user. An existing dialog is overwritten; a new
    /// order discards the old draft without error.
    pub async fn begin(&self, telegram_id: i64, display_name: impl Into<String>) {
        let mut dialogs = self.inner.lock().await;
        let previous = dialogs.insert(telegram_id, OrderDialog::start(telegram_id, display_name));
        if previous.is_some() {
            debug!(user_id = telegram_id, "Existing dialog overwritten by new order");
        }
    }

    /// Feed one inbound message to the user's dialog, if any.
    ///
    /// Returns `None` when the user has no active dialog. On a terminal
    /// outcome (completed or cancelled) the entry is removed before the
    /// lock is released, so the state is torn down regardless of what
    /// happens to the subsequent deliveries.
    pub async fn advance(&self, telegram_id: i64, input: &str) -> Option<DialogOutcome> {
        let mut dialogs = self.inner.lock().await;
        let dialog = dialogs.get_mut(&telegram_id)?;
        let outcome = dialog.advance(input);

        if matches!(outcome, DialogOutcome::Completed(_) | DialogOutcome::Cancelled) {
            dialogs.remove(&telegram_id);
        }

        Some(outcome)
    }

    /// Cancel the user's dialog, returning whether one was active
    pub async fn cancel(&self, telegram_id: i64) -> bool {
        let mut dialogs = self.inner.lock().await;
        dialogs.remove(&telegram_id).is_some()
    }

    /// Whether the user currently has an active dialog
    pub async fn is_active(&self, telegram_id: i64) -> bool {
        let dialogs = self.inner.lock().await;
        dialogs.contains_key(&telegram_id)
    }
}
