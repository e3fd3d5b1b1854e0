//! # Telegram fun chat bot
//!
//! Answers group chat messages in a playful persona. Each message runs once through a reply chain
//! (see [`handlers`]): bot/non-text filter, mention handling, auto-reply gate, slash commands,
//! mute, local time/date answers, then the Groq model with a canned fallback. Per-chat mood,
//! mute, auto-reply mode and history live in an in-memory [`chat_state`] store.
//!
//! Updates arrive by long polling or by webhook ([`telegram`]); both feed [`ReplyComposer`].

pub mod check;
pub mod cli;
pub mod commands;
pub mod components;
pub mod composer;
pub mod config;
pub mod handlers;
pub mod intent;
pub mod mention;
pub mod prompt;
pub mod runner;
pub mod telegram;

pub use check::{check_env_vars, run_check, EnvCheck};
pub use cli::{webhook_addr, Cli, Commands};
pub use commands::{help_text, CommandError, CommandRouter, DEFAULT_MUTE_MINUTES};
pub use components::{build_bot_components, build_reply_chain, BotComponents, BotIdentity};
pub use composer::ReplyComposer;
pub use config::{BotConfig, ConfigError};
pub use intent::{resolve_intent, IntentResolver};
pub use mention::MentionExtractor;
pub use prompt::{build_system_prompt, FALLBACK_MESSAGES, SYSTEM_PROMPT};
pub use runner::{run_bot, DeliveryMode};
pub use telegram::{
    incoming_from_update, process_update, router, Poller, TelegramMessageWrapper, WebhookState,
};
