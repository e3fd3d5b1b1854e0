//! Per-message working state threaded through the chain.

use relay_core::IncomingMessage;

/// The message being answered plus what earlier strategies learned about it.
#[derive(Debug, Clone)]
pub struct Turn {
    pub message: IncomingMessage,
    /// Text the later strategies act on: raw text trimmed, or the residue after a mention.
    pub effective_text: String,
    /// Whether the bot was @-mentioned.
    pub mentioned: bool,
}

impl Turn {
    pub fn new(message: IncomingMessage) -> Self {
        let effective_text = message
            .text
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        Self {
            message,
            effective_text,
            mentioned: false,
        }
    }

    /// Raw text, trimmed; empty for non-text messages.
    pub fn raw_text(&self) -> &str {
        self.message.text.as_deref().map(str::trim).unwrap_or_default()
    }
}
