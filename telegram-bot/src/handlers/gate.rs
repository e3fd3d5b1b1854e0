//! Strategies that only ever stop the chain.

use async_trait::async_trait;
use chat_state::{AutoReplyMode, ChatStateStore};
use relay_core::{Clock, ReplyDecision, Result};
use reply_chain::{ReplyStrategy, Turn};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Never answer bots or non-text payloads.
#[derive(Debug, Clone, Default)]
pub struct SenderFilter;

#[async_trait]
impl ReplyStrategy for SenderFilter {
    fn name(&self) -> &'static str {
        "sender_filter"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        if turn.message.text.is_none() {
            debug!(chat_id = turn.message.chat_id.0, "Ignoring non-text message");
            return Ok(Some(ReplyDecision::NoAction));
        }
        if turn.message.sender_is_bot() {
            debug!(chat_id = turn.message.chat_id.0, "Ignoring bot message");
            return Ok(Some(ReplyDecision::NoAction));
        }
        Ok(None)
    }
}

/// In mention-only chats, ignores text that neither mentions the bot nor is a command.
pub struct AutoReplyGate {
    store: Arc<dyn ChatStateStore>,
}

impl AutoReplyGate {
    pub fn new(store: Arc<dyn ChatStateStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReplyStrategy for AutoReplyGate {
    fn name(&self) -> &'static str {
        "auto_reply_gate"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        let chat_id = turn.message.chat_id;
        if turn.mentioned
            || turn.effective_text.starts_with('/')
            || self.store.get_auto_reply_mode(chat_id) != AutoReplyMode::MentionOnly
        {
            return Ok(None);
        }
        info!(
            chat_id = chat_id.0,
            "Chat in mention-only mode, ignoring message without mention"
        );
        Ok(Some(ReplyDecision::NoAction))
    }
}

/// Drops messages missing a message id, a sender id or any text to act on.
#[derive(Debug, Clone, Default)]
pub struct RequiredFields;

#[async_trait]
impl ReplyStrategy for RequiredFields {
    fn name(&self) -> &'static str {
        "required_fields"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        let message = &turn.message;
        let user_id = message.sender_id();
        if message.chat_id.0 == 0
            || message.message_id == 0
            || user_id == 0
            || turn.effective_text.is_empty()
        {
            warn!(
                chat_id = message.chat_id.0,
                message_id = message.message_id,
                user_id,
                has_text = !turn.effective_text.is_empty(),
                "Missing required fields"
            );
            return Ok(Some(ReplyDecision::NoAction));
        }
        info!(
            chat_id = message.chat_id.0,
            user_id,
            display_name = message.sender.as_ref().map(|u| u.display_name()).unwrap_or_default(),
            text = %preview(turn.raw_text()),
            "Processing message"
        );
        Ok(None)
    }
}

/// First 50 characters, for logs.
fn preview(text: &str) -> String {
    text.chars().take(50).collect()
}

/// Silences a muted chat. Commands run before this, so `/mute` can always be changed.
pub struct MuteGate {
    store: Arc<dyn ChatStateStore>,
    clock: Arc<dyn Clock>,
}

impl MuteGate {
    pub fn new(store: Arc<dyn ChatStateStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }
}

#[async_trait]
impl ReplyStrategy for MuteGate {
    fn name(&self) -> &'static str {
        "mute_gate"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        let chat_id = turn.message.chat_id;
        if self.store.is_muted(chat_id, self.clock.now()) {
            info!(chat_id = chat_id.0, "Chat is muted, ignoring message");
            return Ok(Some(ReplyDecision::Muted));
        }
        Ok(None)
    }
}
