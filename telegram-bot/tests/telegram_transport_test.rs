//! Telegram HTTP transport against a mockito Bot API: long-poll offsets and sendMessage payloads.

mod mock_services;

use mock_services::{harness, text_message, MockRemote, CHAT};
use mockito::Matcher;
use relay_core::{Bot, OutboundReply, TelegramBot};
use serde_json::json;
use telegram_bot::Poller;

const GET_UPDATES: &str = r"(?i)^/bot.+/getupdates$";
const SEND_MESSAGE: &str = r"(?i)^/bot.+/sendmessage$";

fn teloxide_bot(server: &mockito::Server) -> teloxide::Bot {
    teloxide::Bot::new("123456:test-token")
        .set_api_url(reqwest::Url::parse(&server.url()).unwrap())
}

fn update(update_id: u32, message_id: i32, text: &str) -> serde_json::Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": message_id,
            "date": 1714529100,
            "chat": {"id": CHAT.0, "type": "supergroup", "title": "Hội vui"},
            "from": {"id": 42, "is_bot": false, "first_name": "An", "username": "an_nguyen"},
            "text": text
        }
    })
}

/// **Test: poll_once processes every update in id order and moves the offset past the last one.**
#[tokio::test]
async fn test_poll_once_advances_offset() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Regex(GET_UPDATES.to_string()))
        .match_body(Matcher::PartialJson(json!({"offset": 0})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "result": [update(11, 8, "hai"), update(10, 7, "một")]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let h = harness(MockRemote::answering("ok"), 4);
    let mut poller = Poller::new(teloxide_bot(&server), h.composer.clone());

    let count = poller.poll_once().await.unwrap();

    mock.assert_async().await;
    assert_eq!(count, 2);
    assert_eq!(poller.offset(), 12);
    let sent = h.bot.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].reply_to_message_id, 7);
    assert_eq!(sent[1].reply_to_message_id, 8);
}

/// **Test: An API error leaves the offset untouched.**
#[tokio::test]
async fn test_poll_once_error_keeps_offset() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Regex(GET_UPDATES.to_string()))
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":409,"description":"Conflict: terminated by other getUpdates request"}"#)
        .create_async()
        .await;

    let h = harness(MockRemote::answering("ok"), 0);
    let mut poller = Poller::new(teloxide_bot(&server), h.composer.clone());

    assert!(poller.poll_once().await.is_err());
    assert_eq!(poller.offset(), 0);
    assert!(h.bot.sent().is_empty());
}

/// **Test: An empty poll returns zero and keeps the offset.**
#[tokio::test]
async fn test_poll_once_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Regex(GET_UPDATES.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":true,"result":[]}"#)
        .create_async()
        .await;

    let h = harness(MockRemote::answering("ok"), 0);
    let mut poller = Poller::new(teloxide_bot(&server), h.composer.clone());

    assert_eq!(poller.poll_once().await.unwrap(), 0);
    assert_eq!(poller.offset(), 0);
}

/// **Test: TelegramBot sends Markdown text to the right chat.**
#[tokio::test]
async fn test_send_reply_payload() {
    let mut server = mockito::Server::new_async().await;
    let reply = OutboundReply::compose(&text_message("hi"), "xin chào");
    let mock = server
        .mock("POST", Matcher::Regex(SEND_MESSAGE.to_string()))
        .match_body(Matcher::PartialJson(json!({
            "chat_id": CHAT.0,
            "parse_mode": "Markdown",
            "text": r"[an\_nguyen](tg://user?id=42) xin chào"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "result": {
                    "message_id": 99,
                    "date": 1714529101,
                    "chat": {"id": CHAT.0, "type": "supergroup", "title": "Hội vui"},
                    "from": {"id": 123456, "is_bot": true, "first_name": "FunBot", "username": "fun_bot"},
                    "text": "an_nguyen xin chào"
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    TelegramBot::new(teloxide_bot(&server))
        .send_reply(&reply)
        .await
        .unwrap();

    mock.assert_async().await;
}

/// **Test: A Bot API error surfaces as an error from send_reply.**
#[tokio::test]
async fn test_send_reply_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", Matcher::Regex(SEND_MESSAGE.to_string()))
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
        .create_async()
        .await;

    let reply = OutboundReply::compose(&text_message("hi"), "xin chào");
    let result = TelegramBot::new(teloxide_bot(&server)).send_reply(&reply).await;
    assert!(result.is_err());
}
