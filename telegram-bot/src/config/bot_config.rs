//! BotConfig: Telegram connection, Groq model, per-chat history bound, webhook bind address,
//! logging and local timezone.

use chrono_tz::Tz;
use groq_client::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use std::env;
use std::time::Duration;

use super::error::ConfigError;

pub const DEFAULT_WEBHOOK_HOST: &str = "localhost";
pub const DEFAULT_WEBHOOK_PORT: u16 = 5000;
pub const DEFAULT_LOG_FILE: &str = "logs/funbot.log";
pub const DEFAULT_TIMEZONE: &str = "Asia/Ho_Chi_Minh";

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_TOKEN
    pub telegram_token: String,
    /// GROQ_API_KEY
    pub groq_api_key: String,
    /// BOT_USERNAME without the leading `@`; `None` disables mention detection.
    pub bot_username: Option<String>,
    /// Numeric prefix of the token (`123:abc` → 123), used to spot replies to the bot.
    pub bot_user_id: Option<i64>,
    /// GROQ_API_URL (full endpoint or API base)
    pub groq_api_url: String,
    /// GROQ_MODEL
    pub groq_model: String,
    /// GROQ_TIMEOUT_SECS
    pub groq_timeout: Duration,
    /// CHAT_HISTORY_LENGTH; 0 disables history
    pub history_length: usize,
    /// WEBHOOK_HOST
    pub webhook_host: String,
    /// WEBHOOK_PORT
    pub webhook_port: u16,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// LOG_FILE
    pub log_file: String,
    /// BOT_TIMEZONE
    pub timezone: Tz,
}

/// Reads a variable, treating empty or whitespace-only values as unset.
fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl BotConfig {
    /// Loads from environment variables. `token` overrides TELEGRAM_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self, ConfigError> {
        let telegram_token = token
            .filter(|t| !t.trim().is_empty())
            .or_else(|| var("TELEGRAM_TOKEN"))
            .ok_or(ConfigError::Missing("TELEGRAM_TOKEN"))?;
        let groq_api_key = var("GROQ_API_KEY").ok_or(ConfigError::Missing("GROQ_API_KEY"))?;

        let bot_username = var("BOT_USERNAME")
            .map(|u| u.trim_start_matches('@').to_string())
            .filter(|u| !u.is_empty());
        let bot_user_id = bot_user_id_from_token(&telegram_token);

        let groq_api_url = var("GROQ_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let groq_model = var("GROQ_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let groq_timeout = match var("GROQ_TIMEOUT_SECS") {
            Some(v) => match v.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::invalid(
                        "GROQ_TIMEOUT_SECS",
                        &v,
                        "expected a positive number of seconds",
                    ))
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let history_length = var("CHAT_HISTORY_LENGTH")
            .and_then(|v| v.parse::<i64>().ok())
            .map(|n| n.max(0) as usize)
            .unwrap_or(0);

        let webhook_host =
            var("WEBHOOK_HOST").unwrap_or_else(|| DEFAULT_WEBHOOK_HOST.to_string());
        let webhook_port = match var("WEBHOOK_PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("WEBHOOK_PORT", &v, e))?,
            None => DEFAULT_WEBHOOK_PORT,
        };

        let telegram_api_url = var("TELEGRAM_API_URL").or_else(|| var("TELOXIDE_API_URL"));
        let log_file = var("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        let tz_name = var("BOT_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let timezone = tz_name
            .parse::<Tz>()
            .map_err(|e| ConfigError::invalid("BOT_TIMEZONE", &tz_name, e))?;

        Ok(Self {
            telegram_token,
            groq_api_key,
            bot_username,
            bot_user_id,
            groq_api_url,
            groq_model,
            groq_timeout,
            history_length,
            webhook_host,
            webhook_port,
            telegram_api_url,
            log_file,
            timezone,
        })
    }

    /// Validates URLs (TELEGRAM_API_URL if set, GROQ_API_URL).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref url_str) = self.telegram_api_url {
            reqwest::Url::parse(url_str)
                .map_err(|e| ConfigError::invalid("TELEGRAM_API_URL", url_str, e))?;
        }
        reqwest::Url::parse(&self.groq_api_url)
            .map_err(|e| ConfigError::invalid("GROQ_API_URL", &self.groq_api_url, e))?;
        Ok(())
    }

    /// Builds the teloxide bot, pointed at TELEGRAM_API_URL when set.
    pub fn teloxide_bot(&self) -> Result<teloxide::Bot, ConfigError> {
        let bot = teloxide::Bot::new(self.telegram_token.clone());
        match self.telegram_api_url {
            Some(ref url_str) => {
                let url = reqwest::Url::parse(url_str)
                    .map_err(|e| ConfigError::invalid("TELEGRAM_API_URL", url_str, e))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

/// Telegram tokens look like `<bot id>:<secret>`.
pub fn bot_user_id_from_token(token: &str) -> Option<i64> {
    token.split(':').next()?.trim().parse().ok()
}
