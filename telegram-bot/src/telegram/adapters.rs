//! teloxide types → relay-core types.

use relay_core::{ChatId, IncomingMessage, ReplyTarget, ToIncomingMessage, UserRef};

/// Telegram user → [`UserRef`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl TelegramUserWrapper<'_> {
    pub fn to_user_ref(&self) -> UserRef {
        UserRef {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()).filter(|n| !n.is_empty()),
            is_bot: self.0.is_bot,
        }
    }
}

/// Telegram message → [`IncomingMessage`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl ToIncomingMessage for TelegramMessageWrapper<'_> {
    fn to_incoming(&self) -> IncomingMessage {
        let msg = self.0;
        IncomingMessage {
            chat_id: ChatId(msg.chat.id.0),
            message_id: i64::from(msg.id.0),
            sender: msg.from.as_ref().map(|u| TelegramUserWrapper(u).to_user_ref()),
            text: msg.text().map(str::to_string),
            reply_to: msg.reply_to_message().map(|r| ReplyTarget {
                message_id: i64::from(r.id.0),
                sender: r.from.as_ref().map(|u| TelegramUserWrapper(u).to_user_ref()),
            }),
        }
    }
}
