//! # Groq chat client
//!
//! Chat completion against Groq's OpenAI-compatible endpoint via [async-openai].
//!
//! [`RemoteReplyClient`] is the contract the reply chain depends on: one attempt, bounded by a
//! short timeout, and every failure (timeout, transport, HTTP status, empty content) collapses into
//! `None` so the caller can fall back uniformly. [`GroqClient`] implements it.

mod mask;

pub use mask::mask_token;

use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use relay_core::{HistoryEntry, HistoryRole};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-8b-instant";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Produces a reply for the latest user turn, or `None` when no usable reply came back.
#[async_trait]
pub trait RemoteReplyClient: Send + Sync {
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[HistoryEntry],
        user_text: &str,
    ) -> Option<String>;
}

/// Reduces a full endpoint URL to the API base async-openai expects
/// (`.../openai/v1/chat/completions` → `.../openai/v1`). Base URLs pass through.
pub fn api_base_from_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/chat/completions")
        .unwrap_or(trimmed)
        .to_string()
}

/// Builds `[system] + history + [user]`.
pub fn build_messages(
    system_prompt: &str,
    history: &[HistoryEntry],
    user_text: &str,
) -> anyhow::Result<Vec<ChatCompletionRequestMessage>> {
    let mut messages: Vec<ChatCompletionRequestMessage> = Vec::with_capacity(history.len() + 2);
    messages.push(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt)
            .build()?
            .into(),
    );
    for entry in history {
        let message: ChatCompletionRequestMessage = match entry.role {
            HistoryRole::User => ChatCompletionRequestUserMessageArgs::default()
                .content(entry.content.as_str())
                .build()?
                .into(),
            HistoryRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(entry.content.as_str())
                .build()?
                .into(),
        };
        messages.push(message);
    }
    messages.push(
        ChatCompletionRequestUserMessageArgs::default()
            .content(user_text)
            .build()?
            .into(),
    );
    Ok(messages)
}

/// Backoff that gives up after the first failed request, so 429s are not retried.
fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// Groq chat client: fixed model, per-request timeout, masked key for logs.
#[derive(Clone)]
pub struct GroqClient {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    timeout: Duration,
    api_key_for_logging: String,
}

impl GroqClient {
    /// `api_url` may be the full `/chat/completions` endpoint or the API base.
    pub fn new(
        api_key: String,
        api_url: &str,
        model: String,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let config = OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(api_base_from_url(api_url));
        let client = Client::with_config(config)
            .with_http_client(http)
            .with_backoff(single_attempt());
        Ok(Self {
            client: Arc::new(client),
            model,
            timeout,
            api_key_for_logging: api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends one chat completion request and returns the first choice's content, trimmed.
    /// Errors propagate; no timeout beyond the HTTP client's own.
    pub async fn chat_completion(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> anyhow::Result<String> {
        info!(
            model = %self.model,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "Groq chat_completion request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            debug!(request_json = %json, "Groq chat_completion request JSON");
        }

        let response = self.client.chat().create(request).await?;

        if let Some(ref u) = response.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "Groq chat_completion usage"
            );
        }

        let Some(choice) = response.choices.first() else {
            anyhow::bail!("No choices in Groq response");
        };
        Ok(choice
            .message
            .content
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

#[async_trait]
impl RemoteReplyClient for GroqClient {
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[HistoryEntry],
        user_text: &str,
    ) -> Option<String> {
        let messages = match build_messages(system_prompt, history, user_text) {
            Ok(m) => m,
            Err(e) => {
                warn!(error = %e, "Failed to build Groq request");
                return None;
            }
        };

        match tokio::time::timeout(self.timeout, self.chat_completion(messages)).await {
            Ok(Ok(text)) if !text.is_empty() => Some(text),
            Ok(Ok(_)) => {
                warn!("Groq returned empty content");
                None
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Groq request failed");
                None
            }
            Err(_) => {
                warn!(timeout = ?self.timeout, "Groq request timed out");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_from_url() {
        assert_eq!(
            api_base_from_url(DEFAULT_API_URL),
            "https://api.groq.com/openai/v1"
        );
        assert_eq!(
            api_base_from_url("https://api.groq.com/openai/v1/"),
            "https://api.groq.com/openai/v1"
        );
        assert_eq!(
            api_base_from_url("http://127.0.0.1:8080/chat/completions/"),
            "http://127.0.0.1:8080"
        );
    }

    #[test]
    fn test_build_messages_order() {
        let history = vec![HistoryEntry::user("hi"), HistoryEntry::assistant("yo")];
        let messages = build_messages("sys", &history, "hello").unwrap();
        assert_eq!(messages.len(), 4);
        assert!(matches!(messages[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(messages[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(messages[2], ChatCompletionRequestMessage::Assistant(_)));
        assert!(matches!(messages[3], ChatCompletionRequestMessage::User(_)));
    }
}
