//! Mention handling: the "I'm here" ping and mention stripping.

use async_trait::async_trait;
use relay_core::{ReplyDecision, Result};
use reply_chain::{ReplyStrategy, Turn};
use tracing::debug;

use crate::mention::MentionExtractor;

/// Bare `@bot` → MentionPing. `@bot question` → the question becomes the effective text.
pub struct MentionStrategy {
    extractor: MentionExtractor,
}

impl MentionStrategy {
    pub fn new(extractor: MentionExtractor) -> Self {
        Self { extractor }
    }
}

#[async_trait]
impl ReplyStrategy for MentionStrategy {
    fn name(&self) -> &'static str {
        "mention"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        let (cleaned, mentioned) = self.extractor.extract(turn.raw_text());
        if !mentioned {
            return Ok(None);
        }
        turn.mentioned = true;
        if cleaned.is_empty() {
            debug!(chat_id = turn.message.chat_id.0, "Bare mention");
            return Ok(Some(ReplyDecision::MentionPing));
        }
        turn.effective_text = cleaned;
        Ok(None)
    }
}

/// A reply to one of the bot's own messages with no text → MentionPing.
#[derive(Debug, Clone, Copy)]
pub struct ReplyToBotPing {
    bot_user_id: Option<i64>,
}

impl ReplyToBotPing {
    pub fn new(bot_user_id: Option<i64>) -> Self {
        Self { bot_user_id }
    }
}

#[async_trait]
impl ReplyStrategy for ReplyToBotPing {
    fn name(&self) -> &'static str {
        "reply_to_bot_ping"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        let Some(bot_user_id) = self.bot_user_id else {
            return Ok(None);
        };
        if turn.raw_text().is_empty() && turn.message.is_reply_to(bot_user_id) {
            return Ok(Some(ReplyDecision::MentionPing));
        }
        Ok(None)
    }
}
