//! Chat state store trait.

use chrono::{DateTime, Utc};
use relay_core::{ChatId, HistoryEntry};
use thiserror::Error;

use crate::mood::MoodKey;
use crate::types::AutoReplyMode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MuteError {
    #[error("mute duration must be positive, got {0} minutes")]
    NonPositive(i64),
}

/// Per-chat settings and history. Operations on one chat are atomic with respect to each other;
/// chats never see each other's state. Every chat starts with defaults.
pub trait ChatStateStore: Send + Sync {
    fn get_mood(&self, chat_id: ChatId) -> MoodKey;

    fn set_mood(&self, chat_id: ChatId, mood: MoodKey);

    fn get_auto_reply_mode(&self, chat_id: ChatId) -> AutoReplyMode;

    fn set_auto_reply_mode(&self, chat_id: ChatId, mode: AutoReplyMode);

    /// True iff a mute expiry exists and lies after `now`. An expired entry is cleared.
    fn is_muted(&self, chat_id: ChatId, now: DateTime<Utc>) -> bool;

    /// Mutes the chat until `now + minutes`, replacing any earlier expiry. Returns the expiry.
    fn mute(
        &self,
        chat_id: ChatId,
        minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, MuteError>;

    /// Appends one entry, dropping the oldest past the limit. No-op for empty content or a zero limit.
    fn append_history(&self, chat_id: ChatId, entry: HistoryEntry);

    /// Appends a finished turn (optional user entry, then the assistant entry) as one mutation,
    /// so concurrent turns in the same chat never interleave. Empty entries are skipped.
    fn append_turn(&self, chat_id: ChatId, user: Option<HistoryEntry>, assistant: HistoryEntry);

    /// Entries oldest first; at most [`history_limit`](Self::history_limit) of them.
    fn recent_history(&self, chat_id: ChatId) -> Vec<HistoryEntry>;

    fn history_limit(&self) -> usize;
}
