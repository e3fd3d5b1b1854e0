use async_trait::async_trait;
use relay_core::{Clock, ReplyDecision, Result};
use reply_chain::{ReplyStrategy, Turn};
use std::sync::Arc;

use crate::intent::IntentResolver;

/// Time and date questions, answered without the remote model.
pub struct LocalIntentStrategy {
    resolver: IntentResolver,
    clock: Arc<dyn Clock>,
}

impl LocalIntentStrategy {
    pub fn new(resolver: IntentResolver, clock: Arc<dyn Clock>) -> Self {
        Self { resolver, clock }
    }
}

#[async_trait]
impl ReplyStrategy for LocalIntentStrategy {
    fn name(&self) -> &'static str {
        "local_intent"
    }

    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>> {
        Ok(self
            .resolver
            .resolve(&turn.effective_text, self.clock.now())
            .map(ReplyDecision::LocalIntent))
    }
}
