use async_trait::async_trait;
use relay_core::{ReplyDecision, Result};
use reply_chain::{ReplyStrategy, Turn};
use std::sync::Arc;

use crate::commands::CommandRouter;

pub struct CommandStrategy {
    router: Arc<CommandRouter>,
}

impl CommandStrategy {
    pub fn new(router: Arc<CommandRouter>) -> Self {
        Self { router }
    }
}

#[async_trait]
impl ReplyStrategy for CommandStrategy {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        Ok(self
            .router
            .route(turn.message.chat_id, &turn.effective_text)
            .map(ReplyDecision::CommandResult))
    }
}
