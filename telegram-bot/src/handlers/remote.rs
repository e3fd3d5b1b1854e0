//! Terminal strategy: ask the remote model, fall back to a canned line.

use async_trait::async_trait;
use chat_state::ChatStateStore;
use groq_client::RemoteReplyClient;
use relay_core::{ReplyDecision, Result};
use reply_chain::{ReplyStrategy, Turn};
use std::sync::Arc;
use tracing::info;

use crate::prompt::{build_system_prompt, random_fallback};

pub struct RemoteReplyStrategy {
    client: Arc<dyn RemoteReplyClient>,
    store: Arc<dyn ChatStateStore>,
}

impl RemoteReplyStrategy {
    pub fn new(client: Arc<dyn RemoteReplyClient>, store: Arc<dyn ChatStateStore>) -> Self {
        Self { client, store }
    }
}

#[async_trait]
impl ReplyStrategy for RemoteReplyStrategy {
    fn name(&self) -> &'static str {
        "remote_reply"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        let chat_id = turn.message.chat_id;
        let system_prompt = build_system_prompt(self.store.get_mood(chat_id));
        let history = self.store.recent_history(chat_id);

        let decision = match self
            .client
            .reply(&system_prompt, &history, &turn.effective_text)
            .await
        {
            Some(text) => ReplyDecision::RemoteReply(text),
            None => {
                let fallback = random_fallback();
                info!(chat_id = chat_id.0, fallback, "No remote reply, using fallback");
                ReplyDecision::Fallback(fallback.to_string())
            }
        };
        Ok(Some(decision))
    }
}
