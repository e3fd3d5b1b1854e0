//! Error types for the relay core.
//!
//! [`RelayError`] is the top-level error. Command validation failures are not errors at this level:
//! they are ordinary reply text (see the telegram-bot command router).

use thiserror::Error;

/// Top-level error for the relay.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bot error: {0}")]
    Bot(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
