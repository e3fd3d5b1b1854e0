//! Core types: chat id, sender, incoming message, reply decision and outbound reply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reply text for a bare @-mention (or an empty reply to one of the bot's messages).
pub const MENTION_PING_TEXT: &str = "Có mặt! Bạn cần gì nè?";

/// Display name used when the sender has neither a username nor a first name.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Opaque conversation identifier; key for all per-chat state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sender identity (id, username, first name) plus whether the sender is a bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub is_bot: bool,
}

impl UserRef {
    /// Username, else first name, else [`DEFAULT_DISPLAY_NAME`]. Empty strings count as absent.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.first_name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(DEFAULT_DISPLAY_NAME)
    }
}

/// The message an incoming message replies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyTarget {
    pub message_id: i64,
    pub sender: Option<UserRef>,
}

/// One inbound chat message, decoded from the transport. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub message_id: i64,
    pub sender: Option<UserRef>,
    /// Raw text; `None` for non-text payloads (stickers, photos, ...).
    pub text: Option<String>,
    pub reply_to: Option<ReplyTarget>,
}

impl IncomingMessage {
    pub fn sender_is_bot(&self) -> bool {
        self.sender.as_ref().map(|u| u.is_bot).unwrap_or(false)
    }

    pub fn sender_id(&self) -> i64 {
        self.sender.as_ref().map(|u| u.id).unwrap_or(0)
    }

    /// Whether this message replies to a message authored by `bot_user_id`.
    pub fn is_reply_to(&self, bot_user_id: i64) -> bool {
        self.reply_to
            .as_ref()
            .and_then(|r| r.sender.as_ref())
            .map(|u| u.id == bot_user_id)
            .unwrap_or(false)
    }
}

/// Role of a conversation-history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryRole {
    User,
    Assistant,
}

impl HistoryRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRole::User => "user",
            HistoryRole::Assistant => "assistant",
        }
    }
}

/// One remembered turn of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: HistoryRole,
    pub content: String,
}

impl HistoryEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: HistoryRole::Assistant,
            content: content.into(),
        }
    }
}

/// Outcome of the decision chain for one incoming message. Exactly one per message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyDecision {
    /// Bare mention (or empty reply to the bot): answer with [`MENTION_PING_TEXT`].
    MentionPing,
    /// A slash command was handled; carries its response (validation errors included).
    CommandResult(String),
    /// The chat is muted; nothing is sent.
    Muted,
    /// Answered locally (time / date questions).
    LocalIntent(String),
    /// Answered by the remote model.
    RemoteReply(String),
    /// Remote model gave nothing; canned response.
    Fallback(String),
    /// Ignored: bot sender, non-text, missing fields, or mention-only mode.
    NoAction,
}

impl ReplyDecision {
    /// Text to send, or `None` when this decision sends nothing.
    pub fn reply_text(&self) -> Option<&str> {
        match self {
            ReplyDecision::MentionPing => Some(MENTION_PING_TEXT),
            ReplyDecision::CommandResult(s)
            | ReplyDecision::LocalIntent(s)
            | ReplyDecision::RemoteReply(s)
            | ReplyDecision::Fallback(s) => Some(s.as_str()),
            ReplyDecision::Muted | ReplyDecision::NoAction => None,
        }
    }

    /// Short variant name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            ReplyDecision::MentionPing => "MentionPing",
            ReplyDecision::CommandResult(_) => "CommandResult",
            ReplyDecision::Muted => "Muted",
            ReplyDecision::LocalIntent(_) => "LocalIntent",
            ReplyDecision::RemoteReply(_) => "RemoteReply",
            ReplyDecision::Fallback(_) => "Fallback",
            ReplyDecision::NoAction => "NoAction",
        }
    }
}

/// A formatted reply ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundReply {
    pub chat_id: ChatId,
    pub reply_to_message_id: i64,
    /// Legacy-Markdown text: sender mention link followed by the escaped reply.
    pub text: String,
}

impl OutboundReply {
    /// Builds `[<name>](tg://user?id=<id>) <reply>`, escaping name and reply independently.
    pub fn compose(message: &IncomingMessage, reply_text: &str) -> Self {
        let name = message
            .sender
            .as_ref()
            .map(|u| u.display_name())
            .unwrap_or(DEFAULT_DISPLAY_NAME);
        let text = format!(
            "[{}](tg://user?id={}) {}",
            escape_markdown(name),
            message.sender_id(),
            escape_markdown(reply_text)
        );
        Self {
            chat_id: message.chat_id,
            reply_to_message_id: message.message_id,
            text,
        }
    }
}

/// Backslash-escapes the characters that break legacy Markdown links: `\ * _ [ ] ( ) `` ` ``.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '*' | '_' | '[' | ']' | '(' | ')' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Converts a transport-specific message type to [`IncomingMessage`].
pub trait ToIncomingMessage: Send + Sync {
    fn to_incoming(&self) -> IncomingMessage;
}
