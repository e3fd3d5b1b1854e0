//! CLI parser.

use clap::{Parser, Subcommand};

use crate::config::{DEFAULT_WEBHOOK_HOST, DEFAULT_WEBHOOK_PORT};

#[derive(Parser, Debug)]
#[command(name = "funbot")]
#[command(about = "Telegram fun chat bot: poll, webhook, check", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Overrides TELEGRAM_TOKEN.
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Long-poll Telegram for updates.
    Poll,
    /// Serve the webhook endpoint (host/port default to WEBHOOK_HOST / WEBHOOK_PORT).
    Webhook {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check configuration, Telegram connectivity and the Groq API.
    Check,
}

/// Host and port for the webhook: CLI flag, else config, else defaults.
pub fn webhook_addr(
    host: Option<String>,
    port: Option<u16>,
    config_host: Option<&str>,
    config_port: Option<u16>,
) -> (String, u16) {
    (
        host.or_else(|| config_host.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_WEBHOOK_HOST.to_string()),
        port.or(config_port).unwrap_or(DEFAULT_WEBHOOK_PORT),
    )
}
