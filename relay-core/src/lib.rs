//! # relay-core
//!
//! Core types and traits for the chat relay: [`IncomingMessage`], [`ReplyDecision`], the outbound
//! [`Bot`] trait, the [`Clock`] capability and tracing initialization. Transport-agnostic; used by
//! reply-chain, chat-state and the telegram-bot application.

pub mod bot;
pub mod clock;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, TelegramBot};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    escape_markdown, ChatId, HistoryEntry, HistoryRole, IncomingMessage, OutboundReply, ReplyDecision,
    ReplyTarget, ToIncomingMessage, UserRef, DEFAULT_DISPLAY_NAME, MENTION_PING_TEXT,
};
