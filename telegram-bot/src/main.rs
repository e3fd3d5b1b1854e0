//! funbot: Telegram fun chat bot. Config from env (`.env` supported) and CLI args.

use anyhow::Result;
use clap::Parser;
use telegram_bot::{run_bot, run_check, webhook_addr, BotConfig, Cli, Commands, DeliveryMode};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Poll => {
            let config = BotConfig::load(cli.token)?;
            run_bot(config, DeliveryMode::Polling).await
        }
        Commands::Webhook { host, port } => {
            let config = BotConfig::load(cli.token)?;
            let (host, port) = webhook_addr(
                host,
                port,
                Some(config.webhook_host.as_str()),
                Some(config.webhook_port),
            );
            run_bot(config, DeliveryMode::Webhook { host, port }).await
        }
        Commands::Check => {
            if !run_check(cli.token).await? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
