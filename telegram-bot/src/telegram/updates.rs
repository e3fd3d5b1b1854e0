//! Update → reply decision, shared by the poller and the webhook.

use relay_core::{IncomingMessage, ReplyDecision, ToIncomingMessage};
use teloxide::types::{Update, UpdateKind};
use tracing::{debug, info};

use super::adapters::TelegramMessageWrapper;
use crate::composer::ReplyComposer;

/// Only new messages are answered; edits, callbacks and the rest yield `None`.
pub fn incoming_from_update(update: &Update) -> Option<IncomingMessage> {
    match &update.kind {
        UpdateKind::Message(msg) => Some(TelegramMessageWrapper(msg).to_incoming()),
        _ => None,
    }
}

/// Runs one update through the composer. Never fails.
pub async fn process_update(composer: &ReplyComposer, update: &Update) -> ReplyDecision {
    let Some(message) = incoming_from_update(update) else {
        debug!(update_id = update.id.0, "Ignoring non-message update");
        return ReplyDecision::NoAction;
    };
    info!(
        update_id = update.id.0,
        chat_id = message.chat_id.0,
        user_id = message.sender_id(),
        has_text = message.text.is_some(),
        "Received message"
    );
    composer.process(&message).await
}
