use chrono::{DateTime, Utc};
use relay_core::HistoryEntry;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::mood::MoodKey;

/// Whether the bot answers every text message or only when addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AutoReplyMode {
    #[default]
    All,
    MentionOnly,
}

impl AutoReplyMode {
    /// Accepts `all` or `mention` (case-insensitive).
    pub fn parse(input: &str) -> Option<AutoReplyMode> {
        match input.trim().to_lowercase().as_str() {
            "all" => Some(AutoReplyMode::All),
            "mention" => Some(AutoReplyMode::MentionOnly),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutoReplyMode::All => "all",
            AutoReplyMode::MentionOnly => "mention",
        }
    }
}

impl fmt::Display for AutoReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything remembered about one chat. Created lazily with defaults on first touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    pub mood: MoodKey,
    pub auto_reply_mode: AutoReplyMode,
    /// Mute expiry; `None` when not muted.
    pub muted_until: Option<DateTime<Utc>>,
    /// Oldest first.
    pub history: VecDeque<HistoryEntry>,
}
