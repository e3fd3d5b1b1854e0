//! Slash commands: `/alive`, `/help` (`/start`), `/mute`, `/mood`, `/autoreply`.
//!
//! [`CommandRouter::route`] returns `None` for text that is not a known command so the message can
//! continue down the reply chain. Bad arguments are not errors for the caller: the
//! [`CommandError`] text is the reply.

use chat_state::{AutoReplyMode, ChatStateStore, MoodKey, MOOD_OPTIONS_TEXT};
use chrono::{DateTime, Utc};
use relay_core::{ChatId, Clock};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// `/mute` without an argument.
pub const DEFAULT_MUTE_MINUTES: i64 = 10;

/// User-facing validation failures. `Display` is the reply text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Vui lòng nhập số phút hợp lệ, ví dụ /mute 10.")]
    InvalidMinutes,

    #[error("Số phút phải lớn hơn 0.")]
    NonPositiveMinutes,

    #[error("Mood không hợp lệ. Chọn một trong: {}.", MOOD_OPTIONS_TEXT)]
    UnknownMood,

    #[error("Chỉ chấp nhận 'all' hoặc 'mention'. Ví dụ: /autoreply mention")]
    InvalidAutoReplyMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Alive,
    Help,
    Mute,
    Mood,
    AutoReply,
}

impl Command {
    fn from_name(name: &str) -> Option<Command> {
        match name {
            "alive" => Some(Command::Alive),
            "help" | "start" => Some(Command::Help),
            "mute" => Some(Command::Mute),
            "mood" => Some(Command::Mood),
            "autoreply" => Some(Command::AutoReply),
            _ => None,
        }
    }
}

/// Splits `/name[@bot] args...` into a known command and its arguments.
/// `None` if the text does not start with `/` or names an unknown command.
pub fn parse_command(text: &str) -> Option<(Command, Vec<&str>)> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }
    let mut parts = text.split_whitespace();
    let head = parts.next()?.to_lowercase();
    let name = head
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or_default();
    let command = Command::from_name(name)?;
    Some((command, parts.collect()))
}

/// Command summary; the mention line only appears when a bot username is configured.
pub fn help_text(bot_username: Option<&str>) -> String {
    let mut text = format!(
        "Danh sách lệnh:\n\
         /alive - Kiểm tra bot còn hoạt động.\n\
         /mute <phút> - Tạm im lặng trong nhóm.\n\
         /help - Hiển thị các lệnh điều khiển.\n\
         /mood <tên> - Đổi mood bot ({}).\n\
         /autoreply <all|mention> - Bật tắt chế độ trả lời tất cả hay chỉ khi được nhắc.",
        MOOD_OPTIONS_TEXT
    );
    if let Some(username) = bot_username.filter(|u| !u.is_empty()) {
        text.push_str(&format!("\nNhắc @{} để gọi bot xác nhận.", username));
    }
    text
}

/// `n giây` under a minute, else whole minutes.
pub fn format_uptime(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds < 60 {
        format!("{} giây", seconds)
    } else {
        format!("{} phút", seconds / 60)
    }
}

pub struct CommandRouter {
    store: Arc<dyn ChatStateStore>,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
    remote_configured: bool,
    help: String,
}

impl CommandRouter {
    /// Uptime is measured from the clock's current time at construction.
    pub fn new(
        store: Arc<dyn ChatStateStore>,
        clock: Arc<dyn Clock>,
        remote_configured: bool,
        bot_username: Option<&str>,
    ) -> Self {
        let started_at = clock.now();
        Self {
            store,
            clock,
            started_at,
            remote_configured,
            help: help_text(bot_username),
        }
    }

    /// Handles a command for `chat_id`. `None`: not a command, keep going.
    pub fn route(&self, chat_id: ChatId, text: &str) -> Option<String> {
        let (command, args) = parse_command(text)?;
        let result = match command {
            Command::Alive => Ok(self.alive()),
            Command::Help => Ok(self.help.clone()),
            Command::Mute => self.mute(chat_id, &args),
            Command::Mood => self.mood(chat_id, &args),
            Command::AutoReply => self.auto_reply(chat_id, &args),
        };
        Some(result.unwrap_or_else(|e| {
            info!(chat_id = chat_id.0, command = ?command, error = %e, "Command rejected");
            e.to_string()
        }))
    }

    fn alive(&self) -> String {
        let uptime = (self.clock.now() - self.started_at).num_seconds();
        let status = if self.remote_configured {
            "đã sẵn sàng"
        } else {
            "chưa có GROQ_API_KEY"
        };
        format!(
            "Bot vẫn sống khỏe ({}). Groq {}.",
            format_uptime(uptime),
            status
        )
    }

    fn mute(&self, chat_id: ChatId, args: &[&str]) -> Result<String, CommandError> {
        let minutes = match args.first() {
            Some(arg) => arg
                .parse::<i64>()
                .map_err(|_| CommandError::InvalidMinutes)?,
            None => DEFAULT_MUTE_MINUTES,
        };
        if minutes <= 0 {
            return Err(CommandError::NonPositiveMinutes);
        }
        self.store
            .mute(chat_id, minutes, self.clock.now())
            .map_err(|_| CommandError::NonPositiveMinutes)?;
        Ok(format!("Đã im lặng trong {} phút.", minutes))
    }

    fn mood(&self, chat_id: ChatId, args: &[&str]) -> Result<String, CommandError> {
        if args.is_empty() {
            return Ok(format!(
                "Mood hiện tại: {}. Mood khả dụng: {}.",
                self.store.get_mood(chat_id),
                MOOD_OPTIONS_TEXT
            ));
        }
        let mood = MoodKey::parse(&args.join(" ")).ok_or(CommandError::UnknownMood)?;
        self.store.set_mood(chat_id, mood);
        Ok(format!("Đã chuyển mood sang {}. {}", mood.key(), mood.tone()))
    }

    fn auto_reply(&self, chat_id: ChatId, args: &[&str]) -> Result<String, CommandError> {
        let Some(arg) = args.first() else {
            return Ok(format!(
                "Auto-reply hiện tại: {} (all/mention).",
                self.store.get_auto_reply_mode(chat_id)
            ));
        };
        let mode = AutoReplyMode::parse(arg).ok_or(CommandError::InvalidAutoReplyMode)?;
        self.store.set_auto_reply_mode(chat_id, mode);
        Ok(match mode {
            AutoReplyMode::All => "Bot sẽ trả lời tất cả tin nhắn văn bản.".to_string(),
            AutoReplyMode::MentionOnly => {
                "Bot sẽ chỉ trả lời khi được nhắc tên hoặc lệnh.".to_string()
            }
        })
    }
}
