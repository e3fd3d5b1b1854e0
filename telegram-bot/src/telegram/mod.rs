//! Telegram transport: message adapters, update processing, long-polling runner and webhook server.

mod adapters;
mod poller;
mod updates;
mod webhook;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use poller::{retry_delay, run_polling, Poller, IDLE_DELAY, LONG_POLL_TIMEOUT_SECS};
pub use updates::{incoming_from_update, process_update};
pub use webhook::{router, serve_webhook, WebhookState};
