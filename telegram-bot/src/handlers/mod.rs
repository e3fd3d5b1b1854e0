//! Reply strategies, in chain order:
//!
//! 1. [`SenderFilter`]: non-text or bot-authored → NoAction
//! 2. [`MentionStrategy`]: bare mention → MentionPing; otherwise strips the mention
//! 3. [`ReplyToBotPing`]: empty reply to one of the bot's messages → MentionPing
//! 4. [`AutoReplyGate`]: mention-only chat, not mentioned, not a command → NoAction
//! 5. [`RequiredFields`]: missing ids or empty text → NoAction
//! 6. [`CommandStrategy`]: slash command → CommandResult
//! 7. [`MuteGate`]: muted chat → Muted
//! 8. [`LocalIntentStrategy`]: time/date question → LocalIntent
//! 9. [`RemoteReplyStrategy`]: remote model → RemoteReply, else Fallback
//!
//! [`HistoryRecorder`] sits first so its `after` hook runs last and records the finished turn.

mod command;
mod gate;
mod history;
mod intent;
mod mention;
mod remote;

pub use command::CommandStrategy;
pub use gate::{AutoReplyGate, MuteGate, RequiredFields, SenderFilter};
pub use history::HistoryRecorder;
pub use intent::LocalIntentStrategy;
pub use mention::{MentionStrategy, ReplyToBotPing};
pub use remote::RemoteReplyStrategy;
