//! Test doubles for the remote model and the outbound transport, plus component builders.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chat_state::{ChatStateStore, InMemoryChatStateStore};
use chrono::{DateTime, TimeZone, Utc};
use groq_client::RemoteReplyClient;
use relay_core::{
    Bot, ChatId, FixedClock, HistoryEntry, IncomingMessage, OutboundReply, RelayError,
    ReplyTarget, UserRef,
};
use telegram_bot::{BotComponents, BotIdentity, ReplyComposer};

pub const BOT_USERNAME: &str = "fun_bot";
pub const BOT_USER_ID: i64 = 123456;
pub const CHAT: ChatId = ChatId(-100200);

/// One recorded call to the remote model.
#[derive(Debug, Clone)]
pub struct RemoteCall {
    pub system_prompt: String,
    pub history: Vec<HistoryEntry>,
    pub user_text: String,
}

/// Remote model returning a fixed answer, or nothing.
pub struct MockRemote {
    answer: Option<String>,
    pub calls: Mutex<Vec<RemoteCall>>,
}

impl MockRemote {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn silent() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RemoteCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl RemoteReplyClient for MockRemote {
    async fn reply(
        &self,
        system_prompt: &str,
        history: &[HistoryEntry],
        user_text: &str,
    ) -> Option<String> {
        self.calls.lock().unwrap().push(RemoteCall {
            system_prompt: system_prompt.to_string(),
            history: history.to_vec(),
            user_text: user_text.to_string(),
        });
        self.answer.clone()
    }
}

/// Records every reply instead of sending it. Can be told to fail.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<OutboundReply>>,
    pub fail: bool,
}

impl MockBot {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<OutboundReply> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_reply(&self, reply: &OutboundReply) -> relay_core::Result<()> {
        self.sent.lock().unwrap().push(reply.clone());
        if self.fail {
            return Err(RelayError::Bot("send failed".to_string()));
        }
        Ok(())
    }
}

/// 2024-05-01 09:05 in Ho Chi Minh City (02:05 UTC), a Wednesday.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 2, 5, 0).unwrap()
}

pub struct Harness {
    pub composer: ReplyComposer,
    pub store: Arc<InMemoryChatStateStore>,
    pub remote: Arc<MockRemote>,
    pub bot: Arc<MockBot>,
    pub clock: Arc<FixedClock>,
}

pub fn harness(remote: MockRemote, history_length: usize) -> Harness {
    harness_with_bot(remote, MockBot::default(), history_length)
}

pub fn harness_with_bot(remote: MockRemote, bot: MockBot, history_length: usize) -> Harness {
    let store = Arc::new(InMemoryChatStateStore::new(history_length));
    let remote = Arc::new(remote);
    let bot = Arc::new(bot);
    let clock = Arc::new(FixedClock::new(start_time()));

    let components = BotComponents {
        store: store.clone() as Arc<dyn ChatStateStore>,
        remote: remote.clone(),
        clock: clock.clone(),
        bot: bot.clone(),
        identity: BotIdentity {
            username: Some(BOT_USERNAME.to_string()),
            user_id: Some(BOT_USER_ID),
        },
        timezone: chrono_tz::Asia::Ho_Chi_Minh,
        remote_configured: true,
    };

    Harness {
        composer: ReplyComposer::new(&components),
        store,
        remote,
        bot,
        clock,
    }
}

pub fn user() -> UserRef {
    UserRef {
        id: 42,
        username: Some("an_nguyen".to_string()),
        first_name: Some("An".to_string()),
        is_bot: false,
    }
}

pub fn text_message(text: &str) -> IncomingMessage {
    IncomingMessage {
        chat_id: CHAT,
        message_id: 7,
        sender: Some(user()),
        text: Some(text.to_string()),
        reply_to: None,
    }
}

pub fn reply_to_bot(text: &str) -> IncomingMessage {
    IncomingMessage {
        reply_to: Some(ReplyTarget {
            message_id: 6,
            sender: Some(UserRef {
                id: BOT_USER_ID,
                username: Some(BOT_USERNAME.to_string()),
                first_name: Some("FunBot".to_string()),
                is_bot: true,
            }),
        }),
        ..text_message(text)
    }
}
