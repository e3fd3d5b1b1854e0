//! # Reply chain
//!
//! Runs an ordered list of [`ReplyStrategy`] values for one incoming message. Each strategy may
//! rewrite the [`Turn`] and either pass or produce a [`ReplyDecision`]; the first decision ends the
//! chain. `after` callbacks then run in reverse order with the final decision.

mod turn;

pub use turn::Turn;

use async_trait::async_trait;
use relay_core::{ReplyDecision, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// One step of the decision chain.
#[async_trait]
pub trait ReplyStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Returns `Some(decision)` to end the chain, `None` to pass to the next strategy.
    /// May rewrite `turn.effective_text` for later strategies.
    async fn decide(&self, turn: &mut Turn) -> Result<Option<ReplyDecision>>;

    /// Runs after the decision is made (reverse order), e.g. to record history.
    async fn after(&self, _turn: &Turn, _decision: &ReplyDecision) -> Result<()> {
        Ok(())
    }
}

/// Ordered strategies: decide (until the first decision) → after (all, reverse).
#[derive(Clone, Default)]
pub struct ReplyChain {
    strategies: Vec<Arc<dyn ReplyStrategy>>,
}

impl ReplyChain {
    /// Creates an empty chain. An empty chain decides [`ReplyDecision::NoAction`].
    pub fn new() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Appends a strategy.
    pub fn add_strategy(mut self, strategy: Arc<dyn ReplyStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Runs the chain for one turn and returns the decision.
    #[instrument(skip(self, turn), fields(chat_id = turn.message.chat_id.0, message_id = turn.message.message_id))]
    pub async fn run(&self, turn: &mut Turn) -> Result<ReplyDecision> {
        let mut decision = ReplyDecision::NoAction;

        debug!(user_id = turn.message.sender_id(), "step: reply_chain started");

        for strategy in &self.strategies {
            let name = strategy.name();
            debug!(strategy = name, "step: strategy decide");
            if let Some(decided) = strategy.decide(turn).await? {
                info!(
                    strategy = name,
                    decision = decided.label(),
                    "step: reply_chain decided"
                );
                decision = decided;
                break;
            }
        }

        for strategy in self.strategies.iter().rev() {
            strategy.after(turn, &decision).await?;
        }

        debug!(decision = decision.label(), "step: reply_chain finished");
        Ok(decision)
    }
}
