//! Component factory: builds [`BotComponents`] from config and the reply chain from components.

use anyhow::Result;
use chat_state::{ChatStateStore, InMemoryChatStateStore};
use chrono_tz::Tz;
use groq_client::{mask_token, GroqClient, RemoteReplyClient};
use relay_core::{Bot, Clock, SystemClock, TelegramBot};
use reply_chain::ReplyChain;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::commands::CommandRouter;
use crate::config::BotConfig;
use crate::handlers::{
    AutoReplyGate, CommandStrategy, HistoryRecorder, LocalIntentStrategy, MentionStrategy,
    MuteGate, RemoteReplyStrategy, ReplyToBotPing, RequiredFields, SenderFilter,
};
use crate::intent::IntentResolver;
use crate::mention::MentionExtractor;

/// Who the bot is, for mention detection and reply-to-bot detection.
#[derive(Debug, Clone, Default)]
pub struct BotIdentity {
    pub username: Option<String>,
    pub user_id: Option<i64>,
}

/// Everything the reply chain and the transports share.
#[derive(Clone)]
pub struct BotComponents {
    pub store: Arc<dyn ChatStateStore>,
    pub remote: Arc<dyn RemoteReplyClient>,
    pub clock: Arc<dyn Clock>,
    pub bot: Arc<dyn Bot>,
    pub identity: BotIdentity,
    pub timezone: Tz,
    /// Whether a remote API key is configured (reported by `/alive`).
    pub remote_configured: bool,
}

/// Builds the production components: in-memory store, Groq client, system clock, teloxide sender.
#[instrument(skip(config, teloxide_bot))]
pub fn build_bot_components(
    config: &BotConfig,
    teloxide_bot: teloxide::Bot,
) -> Result<BotComponents> {
    info!(
        model = %config.groq_model,
        api_key = %mask_token(&config.groq_api_key),
        history_length = config.history_length,
        timezone = %config.timezone,
        "Building bot components"
    );

    let remote = GroqClient::new(
        config.groq_api_key.clone(),
        &config.groq_api_url,
        config.groq_model.clone(),
        config.groq_timeout,
    )?;

    Ok(BotComponents {
        store: Arc::new(InMemoryChatStateStore::new(config.history_length)),
        remote: Arc::new(remote),
        clock: Arc::new(SystemClock),
        bot: Arc::new(TelegramBot::new(teloxide_bot)),
        identity: BotIdentity {
            username: config.bot_username.clone(),
            user_id: config.bot_user_id,
        },
        timezone: config.timezone,
        remote_configured: !config.groq_api_key.is_empty(),
    })
}

/// Assembles the decision chain in its fixed order.
pub fn build_reply_chain(components: &BotComponents) -> ReplyChain {
    let extractor = MentionExtractor::new(components.identity.username.as_deref());
    let router = Arc::new(CommandRouter::new(
        components.store.clone(),
        components.clock.clone(),
        components.remote_configured,
        components.identity.username.as_deref(),
    ));

    ReplyChain::new()
        .add_strategy(Arc::new(HistoryRecorder::new(
            components.store.clone(),
            extractor.token().map(str::to_string),
        )))
        .add_strategy(Arc::new(SenderFilter))
        .add_strategy(Arc::new(MentionStrategy::new(extractor)))
        .add_strategy(Arc::new(ReplyToBotPing::new(components.identity.user_id)))
        .add_strategy(Arc::new(AutoReplyGate::new(components.store.clone())))
        .add_strategy(Arc::new(RequiredFields))
        .add_strategy(Arc::new(CommandStrategy::new(router)))
        .add_strategy(Arc::new(MuteGate::new(
            components.store.clone(),
            components.clock.clone(),
        )))
        .add_strategy(Arc::new(LocalIntentStrategy::new(
            IntentResolver::new(components.timezone),
            components.clock.clone(),
        )))
        .add_strategy(Arc::new(RemoteReplyStrategy::new(
            components.remote.clone(),
            components.store.clone(),
        )))
}
