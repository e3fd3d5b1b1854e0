//! Long-polling runner: `getUpdates` with an offset cursor, processed one update at a time.

use std::time::Duration;

use teloxide::payloads::GetUpdatesSetters;
use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use tracing::{info, instrument, warn};

use super::updates::process_update;
use crate::composer::ReplyComposer;

/// Server-side long-poll wait. Kept below teloxide's default HTTP timeout.
pub const LONG_POLL_TIMEOUT_SECS: u32 = 10;
/// Pause after a poll that returned nothing.
pub const IDLE_DELAY: Duration = Duration::from_secs(1);
const RETRY_BASE_SECS: u64 = 5;
const RETRY_MAX_SECS: u64 = 60;

/// Back-off after `attempt` consecutive failures: 5s, 10s, 20s, 40s, then 60s.
pub fn retry_delay(attempt: u32) -> Duration {
    let multiplier = 1_u64 << attempt.saturating_sub(1).min(10);
    Duration::from_secs((RETRY_BASE_SECS * multiplier).min(RETRY_MAX_SECS))
}

pub struct Poller {
    bot: teloxide::Bot,
    composer: ReplyComposer,
    /// Next update id to request; 0 until the first update arrives.
    offset: i32,
}

impl Poller {
    pub fn new(bot: teloxide::Bot, composer: ReplyComposer) -> Self {
        Self {
            bot,
            composer,
            offset: 0,
        }
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// One `getUpdates` round. Advances the offset past every received update before processing
    /// it, so a bad update is never fetched twice. Returns the number of updates received.
    pub async fn poll_once(&mut self) -> Result<usize, teloxide::RequestError> {
        let mut updates = self
            .bot
            .get_updates()
            .offset(self.offset)
            .timeout(LONG_POLL_TIMEOUT_SECS)
            .allowed_updates(vec![AllowedUpdate::Message])
            .await?;
        updates.sort_by_key(|u| u.id.0);

        let count = updates.len();
        for update in updates {
            let next = i32::try_from(update.id.0)
                .unwrap_or(i32::MAX)
                .saturating_add(1);
            if next <= self.offset {
                continue;
            }
            self.offset = next;
            process_update(&self.composer, &update).await;
        }
        Ok(count)
    }

    /// Polls forever: short pause when idle, exponential back-off after errors.
    #[instrument(level = "info", skip_all)]
    pub async fn run(mut self) {
        let mut consecutive_failures: u32 = 0;
        loop {
            match self.poll_once().await {
                Ok(count) => {
                    consecutive_failures = 0;
                    if count == 0 {
                        tokio::time::sleep(IDLE_DELAY).await;
                    }
                }
                Err(error) => {
                    consecutive_failures = consecutive_failures.saturating_add(1);
                    let delay = retry_delay(consecutive_failures);
                    warn!(
                        %error,
                        attempt = consecutive_failures,
                        ?delay,
                        "getUpdates failed; retrying with backoff"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Runs the poller until Ctrl-C.
pub async fn run_polling(bot: teloxide::Bot, composer: ReplyComposer) -> anyhow::Result<()> {
    if let Err(e) = bot.delete_webhook().await {
        warn!(error = %e, "Failed to delete webhook before polling");
    }
    info!("Polling for updates");

    tokio::select! {
        _ = Poller::new(bot, composer).run() => Ok(()),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Shutdown signal received, stopping polling");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_grows_and_caps() {
        assert_eq!(retry_delay(1), Duration::from_secs(5));
        assert_eq!(retry_delay(2), Duration::from_secs(10));
        assert_eq!(retry_delay(3), Duration::from_secs(20));
        assert_eq!(retry_delay(4), Duration::from_secs(40));
        assert_eq!(retry_delay(5), Duration::from_secs(60));
        assert_eq!(retry_delay(40), Duration::from_secs(60));
    }
}
