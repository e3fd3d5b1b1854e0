//! # Chat state
//!
//! Per-chat mood, auto-reply mode, mute window and bounded conversation history.
//!
//! [`ChatStateStore`] is the interface the reply strategies talk to; [`InMemoryChatStateStore`]
//! keeps everything in a [`dashmap::DashMap`] keyed by chat. State lives for the process lifetime
//! and is never persisted.
//!
//! ## Example
//!
//! ```rust
//! use chat_state::{AutoReplyMode, ChatStateStore, InMemoryChatStateStore, MoodKey};
//! use relay_core::ChatId;
//!
//! let store = InMemoryChatStateStore::new(4);
//! store.set_mood(ChatId(1), MoodKey::LemLinh);
//! store.set_auto_reply_mode(ChatId(1), AutoReplyMode::MentionOnly);
//!
//! assert_eq!(store.get_mood(ChatId(1)), MoodKey::LemLinh);
//! assert_eq!(store.get_mood(ChatId(2)), MoodKey::Vui);
//! ```

mod memory;
mod mood;
mod store;
mod types;

pub use memory::InMemoryChatStateStore;
pub use mood::{MoodKey, MOOD_OPTIONS_TEXT};
pub use store::{ChatStateStore, MuteError};
pub use relay_core::HistoryEntry;
pub use types::{AutoReplyMode, ChatState};
