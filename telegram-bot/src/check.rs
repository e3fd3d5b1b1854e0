//! `funbot check`: configuration and connectivity report.

use groq_client::{build_messages, mask_token, GroqClient};
use std::env;
use teloxide::prelude::*;

use crate::config::BotConfig;
use crate::prompt::SYSTEM_PROMPT;

/// Variables reported by the check; the first two are required.
pub const CHECKED_VARS: &[(&str, bool)] = &[
    ("TELEGRAM_TOKEN", true),
    ("GROQ_API_KEY", true),
    ("BOT_USERNAME", false),
];

/// One line of the environment report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvCheck {
    pub name: &'static str,
    pub required: bool,
    /// Masked value, `None` when unset.
    pub masked: Option<String>,
}

impl EnvCheck {
    pub fn ok(&self) -> bool {
        !self.required || self.masked.is_some()
    }
}

pub fn check_env_vars() -> Vec<EnvCheck> {
    CHECKED_VARS
        .iter()
        .map(|&(name, required)| EnvCheck {
            name,
            required,
            masked: env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| mask_token(&v)),
        })
        .collect()
}

/// Prints the report. Returns `Ok(false)` when any check failed.
pub async fn run_check(token: Option<String>) -> anyhow::Result<bool> {
    let mut all_ok = true;

    println!("Environment:");
    for check in check_env_vars() {
        let status = match (&check.masked, check.required) {
            (Some(masked), _) => format!("set ({})", masked),
            (None, true) => "MISSING".to_string(),
            (None, false) => "not set".to_string(),
        };
        println!("  {:<16} {}", check.name, status);
        all_ok &= check.ok();
    }

    let config = match BotConfig::load(token).and_then(|c| c.validate().map(|_| c)) {
        Ok(c) => c,
        Err(e) => {
            println!("Config: FAILED ({})", e);
            return Ok(false);
        }
    };
    println!("Config: OK");

    match config.teloxide_bot()?.get_me().await {
        Ok(me) => println!(
            "Telegram getMe: OK (@{}, id {})",
            me.user.username.as_deref().unwrap_or("-"),
            me.user.id
        ),
        Err(e) => {
            println!("Telegram getMe: FAILED ({})", e);
            all_ok = false;
        }
    }

    let groq = GroqClient::new(
        config.groq_api_key.clone(),
        &config.groq_api_url,
        config.groq_model.clone(),
        config.groq_timeout,
    )?;
    let messages = build_messages(SYSTEM_PROMPT, &[], "Xin chào!")?;
    match groq.chat_completion(messages).await {
        Ok(reply) => println!("Groq ({}): OK ({})", groq.model(), reply),
        Err(e) => {
            println!("Groq ({}): FAILED ({})", groq.model(), e);
            all_ok = false;
        }
    }

    Ok(all_ok)
}
