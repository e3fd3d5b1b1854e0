//! Outbound delivery abstraction.
//!
//! [`Bot`] trait is transport-agnostic; [`TelegramBot`] implements it via teloxide.

use crate::error::{RelayError, Result};
use crate::types::OutboundReply;
use async_trait::async_trait;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode, ReplyParameters};
use tracing::info;

/// Delivers a composed reply. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends `reply.text` to `reply.chat_id` as a reply to `reply.reply_to_message_id`.
    async fn send_reply(&self, reply: &OutboundReply) -> Result<()>;
}

/// Teloxide-based implementation of [`Bot`]. Sends with the legacy Markdown parse mode.
#[derive(Clone)]
pub struct TelegramBot {
    bot: teloxide::Bot,
}

impl TelegramBot {
    /// Wraps an existing teloxide bot (shares its HTTP client and API URL).
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

/// Telegram message ids are 32-bit; larger values cannot name a real message.
pub fn to_telegram_message_id(id: i64) -> Result<MessageId> {
    i32::try_from(id)
        .map(MessageId)
        .map_err(|_| RelayError::Bot(format!("message_id out of range: {}", id)))
}

#[async_trait]
impl Bot for TelegramBot {
    #[allow(deprecated)]
    async fn send_reply(&self, reply: &OutboundReply) -> Result<()> {
        let reply_to = to_telegram_message_id(reply.reply_to_message_id)?;
        self.bot
            .send_message(teloxide::types::ChatId(reply.chat_id.0), reply.text.clone())
            .parse_mode(ParseMode::Markdown)
            .reply_parameters(ReplyParameters::new(reply_to))
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        info!(chat_id = reply.chat_id.0, "Message sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_telegram_bot_new() {
        let _bot = TelegramBot::new(teloxide::Bot::new("dummy_token"));
    }

    #[test]
    fn test_to_telegram_message_id() {
        assert_eq!(to_telegram_message_id(123).unwrap(), MessageId(123));
        assert!(to_telegram_message_id(i64::from(i32::MAX) + 1).is_err());
    }
}
