//! Records each answered turn as a (user, assistant) pair.

use async_trait::async_trait;
use chat_state::ChatStateStore;
use relay_core::{HistoryEntry, ReplyDecision, Result};
use reply_chain::{ReplyStrategy, Turn};
use std::sync::Arc;

/// Never decides. Its `after` hook appends the turn to the chat's history.
pub struct HistoryRecorder {
    store: Arc<dyn ChatStateStore>,
    /// `@username`, recorded as the user entry for a ping with no text.
    mention_token: Option<String>,
}

impl HistoryRecorder {
    pub fn new(store: Arc<dyn ChatStateStore>, mention_token: Option<String>) -> Self {
        Self {
            store,
            mention_token,
        }
    }

    /// The user side of the turn, or `None` when nothing should be recorded for it.
    fn user_entry(&self, turn: &Turn, decision: &ReplyDecision) -> Option<String> {
        match decision {
            ReplyDecision::MentionPing => {
                let raw = turn.raw_text();
                if raw.is_empty() {
                    self.mention_token.clone()
                } else {
                    Some(raw.to_string())
                }
            }
            _ => Some(turn.effective_text.clone()),
        }
    }
}

#[async_trait]
impl ReplyStrategy for HistoryRecorder {
    fn name(&self) -> &'static str {
        "history"
    }

    async fn decide(&self, _turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        Ok(None)
    }

    async fn after(&self, turn: &Turn, decision: &ReplyDecision) -> Result<()> {
        let Some(reply) = decision.reply_text() else {
            return Ok(());
        };
        if self.store.history_limit() == 0 {
            return Ok(());
        }
        self.store.append_turn(
            turn.message.chat_id,
            self.user_entry(turn, decision).map(HistoryEntry::user),
            HistoryEntry::assistant(reply),
        );
        Ok(())
    }
}
