//! Bot configuration, loaded from the environment (`.env` supported via dotenvy).

mod bot_config;
mod error;


pub use bot_config::{
    BotConfig, DEFAULT_LOG_FILE, DEFAULT_TIMEZONE, DEFAULT_WEBHOOK_HOST, DEFAULT_WEBHOOK_PORT,
};
pub use error::ConfigError;
