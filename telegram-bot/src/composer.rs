//! ReplyComposer: one pass of the reply chain per message, then delivery.

use relay_core::{Bot, IncomingMessage, OutboundReply, ReplyDecision};
use reply_chain::{ReplyChain, Turn};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::components::{build_reply_chain, BotComponents};

/// Decides and sends the reply for each incoming message. Never fails: chain errors become
/// NoAction and send failures are logged.
#[derive(Clone)]
pub struct ReplyComposer {
    chain: ReplyChain,
    bot: Arc<dyn Bot>,
}

impl ReplyComposer {
    pub fn new(components: &BotComponents) -> Self {
        Self {
            chain: build_reply_chain(components),
            bot: components.bot.clone(),
        }
    }

    /// Builds from an explicit chain (for tests and custom strategy sets).
    pub fn with_chain(chain: ReplyChain, bot: Arc<dyn Bot>) -> Self {
        Self { chain, bot }
    }

    /// Runs the chain without sending anything.
    pub async fn decide(&self, message: &IncomingMessage) -> ReplyDecision {
        let mut turn = Turn::new(message.clone());
        match self.chain.run(&mut turn).await {
            Ok(decision) => decision,
            Err(e) => {
                error!(
                    error = %e,
                    chat_id = message.chat_id.0,
                    message_id = message.message_id,
                    "Reply chain failed"
                );
                ReplyDecision::NoAction
            }
        }
    }

    /// Decides, then sends the reply (if any) as a reply to the incoming message.
    #[instrument(skip(self, message), fields(chat_id = message.chat_id.0, message_id = message.message_id))]
    pub async fn process(&self, message: &IncomingMessage) -> ReplyDecision {
        let decision = self.decide(message).await;
        let Some(text) = decision.reply_text() else {
            return decision;
        };

        let reply = OutboundReply::compose(message, text);
        match self.bot.send_reply(&reply).await {
            Ok(()) => info!(decision = decision.label(), "step: reply sent"),
            Err(e) => error!(error = %e, decision = decision.label(), "Failed to send reply"),
        }
        decision
    }
}
