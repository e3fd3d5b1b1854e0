use anyhow::Result;
use relay_core::init_tracing;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::components::build_bot_components;
use crate::composer::ReplyComposer;
use crate::config::BotConfig;
use crate::telegram::{run_polling, serve_webhook, WebhookState};

/// How updates reach the bot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryMode {
    Polling,
    Webhook { host: String, port: u16 },
}

/// Main entry: validate config, init logging, build components, then serve updates.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig, mode: DeliveryMode) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    let teloxide_bot = config.teloxide_bot()?;
    let components = build_bot_components(&config, teloxide_bot.clone())?;
    let composer = ReplyComposer::new(&components);

    info!(
        bot_username = config.bot_username.as_deref().unwrap_or("-"),
        bot_user_id = config.bot_user_id.unwrap_or_default(),
        "Bot started successfully"
    );

    match mode {
        DeliveryMode::Polling => run_polling(teloxide_bot, composer).await,
        DeliveryMode::Webhook { host, port } => {
            let state = WebhookState {
                composer,
                token: Arc::from(config.telegram_token.as_str()),
            };
            serve_webhook(state, &host, port).await
        }
    }
}
