//! Order dialog state machine
//!
//! This module drives a single user's multi-step order conversation:
//! description, phone, address, then an optional comment or an explicit
//! finish. All transitions go through one `advance` function so the step
//! sequence is exhaustively checkable.

use serde::{Deserialize, Serialize};
use chrono::Utc;

use crate::models::order::{OrderDraft, generate_order_id};

/// Keyword that aborts the dialog from any step
pub const CANCEL_KEYWORD: &str = "Отмена";

/// Keyword that submits the order without a comment
pub const FINISH_KEYWORD: &str = "Завершить оформление";

pub const DESCRIPTION_PROMPT: &str =
    "🌸 Опишите, какой букет или композицию вы хотите заказать:";
pub const PHONE_PROMPT: &str =
    "📞 Укажите контактный телефон для связи:";
pub const ADDRESS_PROMPT: &str =
    "🏠 Укажите адрес доставки:";
pub const COMMENT_PROMPT: &str =
    "💬 Добавьте комментарий к заказу или отправьте «Завершить оформление».";

/// Current step of an active order dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogStep {
    Description,
    Phone,
    Address,
    CommentOrFinish,
}

impl DialogStep {
    /// The prompt the user should see while this step awaits input
    pub fn prompt(&self) -> &'static str {
        match self {
            DialogStep::Description => DESCRIPTION_PROMPT,
            DialogStep::Phone => PHONE_PROMPT,
            DialogStep::Address => ADDRESS_PROMPT,
            DialogStep::CommentOrFinish => COMMENT_PROMPT,
        }
    }
}

/// What the state machine decided for one inbound message
#[derive(Debug, Clone)]
pub enum DialogOutcome {
    /// Dialog continues; send this prompt to the user
    Prompt(&'static str),
    /// Dialog finished; the draft carries an order id and submission time
    Completed(OrderDraft),
    /// Dialog aborted; the draft is discarded
    Cancelled,
}

/// One user's active order dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDialog {
    pub step: DialogStep,
    pub draft: OrderDraft,
}

impl OrderDialog {
    /// Start a fresh dialog at the description step
    pub fn start(telegram_id: i64, display_name: impl Into<String>) -> Self {
        Self {
            step: DialogStep::Description,
            draft: OrderDraft::new(telegram_id, display_name),
        }
    }

    /// Consume one inbound message and advance the dialog.
    ///
    /// Empty input re-prompts the current step. The cancel keyword aborts
    /// from any step. The comment step accepts exactly one more message
    /// and always terminates on it. Phone and address content is accepted
    /// as-is beyond non-emptiness; validating it is a known limitation.
    pub fn advance(&mut self, input: &str) -> DialogOutcome {
        let text = input.trim();

        if text == CANCEL_KEYWORD {
            return DialogOutcome::Cancelled;
        }

        if text.is_empty() {
            return DialogOutcome::Prompt(self.step.prompt());
        }

        match self.step {
            DialogStep::Description => {
                self.draft.description = Some(text.to_string());
                self.step = DialogStep::Phone;
                DialogOutcome::Prompt(PHONE_PROMPT)
            }
            DialogStep::Phone => {
                self.draft.phone = Some(text.to_string());
                self.step = DialogStep::Address;
                DialogOutcome::Prompt(ADDRESS_PROMPT)
            }
            DialogStep::Address => {
                self.draft.address = Some(text.to_string());
                self.step = DialogStep::CommentOrFinish;
                DialogOutcome::Prompt(COMMENT_PROMPT)
            }
            DialogStep::CommentOrFinish => {
                if text != FINISH_KEYWORD {
                    self.draft.comment = Some(text.to_string());
                }
                self.finish()
            }
        }
    }

    fn finish(&mut self) -> DialogOutcome {
        let mut draft = self.draft.clone();
        draft.order_id = Some(generate_order_id());
        draft.submitted_at = Some(Utc::now());
        DialogOutcome::Completed(draft)
    }
}
