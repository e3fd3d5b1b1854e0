//! In-memory [`ChatStateStore`] backed by a [`DashMap`].

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use relay_core::{ChatId, HistoryEntry};
use tracing::{debug, info};

use crate::mood::MoodKey;
use crate::store::{ChatStateStore, MuteError};
use crate::types::{AutoReplyMode, ChatState};

/// Keeps every chat's state in memory. Each call locks one map shard for the chat it touches, so
/// reads and writes on the same chat are serialized while other chats proceed in parallel.
#[derive(Debug, Default)]
pub struct InMemoryChatStateStore {
    chats: DashMap<ChatId, ChatState>,
    history_limit: usize,
}

impl InMemoryChatStateStore {
    /// `history_limit` of 0 disables history entirely.
    pub fn new(history_limit: usize) -> Self {
        Self {
            chats: DashMap::new(),
            history_limit,
        }
    }

    /// Number of chats with state.
    pub fn len(&self) -> usize {
        self.chats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.is_empty()
    }

    /// Snapshot of one chat's state, if it has been touched.
    pub fn snapshot(&self, chat_id: ChatId) -> Option<ChatState> {
        self.chats.get(&chat_id).map(|s| s.value().clone())
    }
}

impl ChatStateStore for InMemoryChatStateStore {
    fn get_mood(&self, chat_id: ChatId) -> MoodKey {
        self.chats
            .get(&chat_id)
            .map(|s| s.mood)
            .unwrap_or_default()
    }

    fn set_mood(&self, chat_id: ChatId, mood: MoodKey) {
        self.chats.entry(chat_id).or_default().mood = mood;
        info!(chat_id = chat_id.0, mood = mood.key(), "Mood changed");
    }

    fn get_auto_reply_mode(&self, chat_id: ChatId) -> AutoReplyMode {
        self.chats
            .get(&chat_id)
            .map(|s| s.auto_reply_mode)
            .unwrap_or_default()
    }

    fn set_auto_reply_mode(&self, chat_id: ChatId, mode: AutoReplyMode) {
        self.chats.entry(chat_id).or_default().auto_reply_mode = mode;
        info!(chat_id = chat_id.0, mode = mode.as_str(), "Auto-reply mode changed");
    }

    fn is_muted(&self, chat_id: ChatId, now: DateTime<Utc>) -> bool {
        let Some(mut state) = self.chats.get_mut(&chat_id) else {
            return false;
        };
        match state.muted_until {
            Some(until) if until > now => true,
            Some(_) => {
                state.muted_until = None;
                debug!(chat_id = chat_id.0, "Mute expired");
                false
            }
            None => false,
        }
    }

    fn mute(
        &self,
        chat_id: ChatId,
        minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, MuteError> {
        if minutes <= 0 {
            return Err(MuteError::NonPositive(minutes));
        }
        let until = Duration::try_minutes(minutes)
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.chats.entry(chat_id).or_default().muted_until = Some(until);
        info!(chat_id = chat_id.0, minutes, until = %until, "Chat muted");
        Ok(until)
    }

    fn append_history(&self, chat_id: ChatId, entry: HistoryEntry) {
        if self.history_limit == 0 || entry.content.is_empty() {
            return;
        }
        let mut state = self.chats.entry(chat_id).or_default();
        state.history.push_back(entry);
        while state.history.len() > self.history_limit {
            state.history.pop_front();
        }
    }

    fn append_turn(&self, chat_id: ChatId, user: Option<HistoryEntry>, assistant: HistoryEntry) {
        if self.history_limit == 0 {
            return;
        }
        let entries: Vec<HistoryEntry> = user
            .into_iter()
            .chain(std::iter::once(assistant))
            .filter(|e| !e.content.is_empty())
            .collect();
        if entries.is_empty() {
            return;
        }
        let mut state = self.chats.entry(chat_id).or_default();
        state.history.extend(entries);
        while state.history.len() > self.history_limit {
            state.history.pop_front();
        }
    }

    fn recent_history(&self, chat_id: ChatId) -> Vec<HistoryEntry> {
        if self.history_limit == 0 {
            return Vec::new();
        }
        self.chats
            .get(&chat_id)
            .map(|s| s.history.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn history_limit(&self) -> usize {
        self.history_limit
    }
}
