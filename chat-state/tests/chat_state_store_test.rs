//! Integration tests for [`chat_state::InMemoryChatStateStore`].

use std::sync::Arc;
use std::thread;

use chat_state::{AutoReplyMode, ChatStateStore, HistoryEntry, InMemoryChatStateStore, MoodKey};
use chrono::{DateTime, Duration, TimeZone, Utc};
use relay_core::{ChatId, HistoryRole};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
}

/// **Test: Mood and auto-reply mode changes stay within their chat.**
#[test]
fn test_settings_are_isolated_per_chat() {
    let store = InMemoryChatStateStore::new(4);
    store.set_mood(ChatId(1), MoodKey::CauGat);
    store.set_auto_reply_mode(ChatId(1), AutoReplyMode::MentionOnly);

    assert_eq!(store.get_mood(ChatId(1)), MoodKey::CauGat);
    assert_eq!(store.get_auto_reply_mode(ChatId(1)), AutoReplyMode::MentionOnly);
    assert_eq!(store.get_mood(ChatId(2)), MoodKey::Vui);
    assert_eq!(store.get_auto_reply_mode(ChatId(2)), AutoReplyMode::All);
}

/// **Test: Muted strictly before the expiry, unmuted at and after it.**
#[test]
fn test_mute_window() {
    let store = InMemoryChatStateStore::new(4);
    let until = store.mute(ChatId(7), 5, start()).unwrap();
    assert_eq!(until, start() + Duration::minutes(5));

    assert!(store.is_muted(ChatId(7), start()));
    assert!(store.is_muted(ChatId(7), start() + Duration::minutes(4)));
    assert!(!store.is_muted(ChatId(7), start() + Duration::minutes(5)));
    assert!(!store.is_muted(ChatId(8), start()));
}

/// **Test: A second mute replaces the first expiry, it does not extend it.**
#[test]
fn test_mute_overwrites() {
    let store = InMemoryChatStateStore::new(4);
    store.mute(ChatId(7), 30, start()).unwrap();
    let until = store.mute(ChatId(7), 1, start()).unwrap();
    assert_eq!(until, start() + Duration::minutes(1));
    assert!(!store.is_muted(ChatId(7), start() + Duration::minutes(2)));
}

/// **Test: History keeps the newest `limit` entries, oldest first, and skips empty content.**
#[test]
fn test_history_is_bounded_fifo() {
    let store = InMemoryChatStateStore::new(3);
    for i in 0..5 {
        store.append_history(ChatId(1), HistoryEntry::user(format!("m{}", i)));
    }
    store.append_history(ChatId(1), HistoryEntry::assistant(""));

    let history = store.recent_history(ChatId(1));
    let contents: Vec<&str> = history.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["m2", "m3", "m4"]);
    assert!(history.iter().all(|e| e.role == HistoryRole::User));
}

/// **Test: A zero history limit stores nothing.**
#[test]
fn test_zero_history_limit_disables_history() {
    let store = InMemoryChatStateStore::new(0);
    store.append_history(ChatId(1), HistoryEntry::user("hello"));
    assert!(store.recent_history(ChatId(1)).is_empty());
    assert_eq!(store.history_limit(), 0);
}

/// **Test: Concurrent writers on different chats never interleave state.**
#[test]
fn test_concurrent_chats_do_not_interfere() {
    let store = Arc::new(InMemoryChatStateStore::new(50));
    let handles: Vec<_> = (0..8)
        .map(|chat| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..50 {
                    store.append_history(
                        ChatId(chat),
                        HistoryEntry::user(format!("{}-{}", chat, i)),
                    );
                }
                if chat % 2 == 0 {
                    store.set_mood(ChatId(chat), MoodKey::LemLinh);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 8);
    for chat in 0..8 {
        let history = store.recent_history(ChatId(chat));
        assert_eq!(history.len(), 50);
        let prefix = format!("{}-", chat);
        assert!(history.iter().all(|e| e.content.starts_with(&prefix)));
        assert_eq!(history[49].content, format!("{}-49", chat));
        let expected = if chat % 2 == 0 {
            MoodKey::LemLinh
        } else {
            MoodKey::Vui
        };
        assert_eq!(store.get_mood(ChatId(chat)), expected);
    }
}

/// **Test: A turn is stored as a user/assistant pair and trimmed once as a unit.**
#[test]
fn test_append_turn_keeps_pairs_and_bound() {
    let store = InMemoryChatStateStore::new(3);
    store.append_turn(ChatId(1), Some(HistoryEntry::user("u1")), HistoryEntry::assistant("a1"));
    store.append_turn(ChatId(1), None, HistoryEntry::assistant("a2"));
    store.append_turn(ChatId(1), Some(HistoryEntry::user("")), HistoryEntry::assistant("a3"));

    let history = store.recent_history(ChatId(1));
    let contents: Vec<&str> = history.iter().map(|e| e.content.as_str()).collect();
    assert_eq!(contents, vec!["a1", "a2", "a3"]);

    let disabled = InMemoryChatStateStore::new(0);
    disabled.append_turn(ChatId(1), Some(HistoryEntry::user("u")), HistoryEntry::assistant("a"));
    assert!(disabled.recent_history(ChatId(1)).is_empty());
}

/// **Test: Concurrent turns in one chat never split a user/assistant pair.**
#[test]
fn test_concurrent_turns_in_one_chat_stay_paired() {
    let store = Arc::new(InMemoryChatStateStore::new(100_000));
    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let tag = format!("{}-{}", worker, i);
                    store.append_turn(
                        ChatId(1),
                        Some(HistoryEntry::user(format!("q{}", tag))),
                        HistoryEntry::assistant(format!("a{}", tag)),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let history = store.recent_history(ChatId(1));
    assert_eq!(history.len(), 8 * 500 * 2);
    for pair in history.chunks(2) {
        assert_eq!(pair[0].role, HistoryRole::User);
        assert_eq!(pair[1].role, HistoryRole::Assistant);
        assert_eq!(pair[0].content[1..], pair[1].content[1..]);
    }
}
