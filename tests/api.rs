use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_bot::{api::create_router, services::Roster, state::{AppState, Settings}};

fn app() -> Router {
    let state = AppState::new(Settings::default(), Roster::in_memory(), 0, "127.0.0.1".into());
    create_router(Arc::new(state))
}

async fn send(app: &Router, chat: i64, text: &str) -> (StatusCode, Value) {
    let request = Request::post(format!("/chats/{chat}/messages"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "text": text, "from": "Ada" }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn commands_get_text_replies() {
    let app = app();

    let (status, body) = send(&app, 1, "/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["chat_id"], 1);
    assert!(body["reply"].as_str().unwrap().starts_with("Hello, Ada"));

    let (_, body) = send(&app, 1, "/set 25 10 30 4").await;
    assert_eq!(body["reply"], "Timer settings have been changed");

    let (_, body) = send(&app, 1, "/settings").await;
    assert_eq!(
        body["reply"],
        "Work: 25 minutes 0 seconds\nBreak: 10 minutes 0 seconds\n\
         Long break: 30 minutes 0 seconds\nPomodoros before long break: 4"
    );

    let (_, body) = send(&app, 1, "/whatever").await;
    assert!(body["reply"].as_str().unwrap().starts_with("This command does not exist"));
}

#[tokio::test]
async fn plain_text_gets_no_content() {
    let app = app();
    let (status, body) = send(&app, 1, "hi there").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn status_reports_structured_state() {
    let app = app();

    let (status, _) = get(&app, "/chats/5/status").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, 5, "/start").await;
    send(&app, 5, "/go").await;
    send(&app, 5, "/pause").await;

    let (status, body) = get(&app, "/chats/5/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["task"], "work");
    assert_eq!(body["phase"], "paused");
    assert_eq!(body["pomodoros_done"], 0);
    assert_eq!(body["settings"]["pomodoros"], 4);
    let remaining = body["remaining_ms"].as_u64().unwrap();
    assert!(remaining > 0 && remaining <= 25 * 60 * 1000);
}

#[tokio::test]
async fn expiry_is_streamed_to_the_chat() {
    let app = app();
    send(&app, 7, "/set 0 0 0 1").await;

    let response = app
        .clone()
        .oneshot(Request::get("/chats/7/notifications").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
    let mut events = response.into_body().into_data_stream();

    // Another chat's expiry is not part of this stream
    send(&app, 8, "/set 0 0 0 1").await;
    send(&app, 8, "/go").await;
    send(&app, 7, "/go").await;

    let frame = tokio::time::timeout(Duration::from_secs(5), events.next())
        .await
        .expect("no notification within 5s")
        .unwrap()
        .unwrap();
    let frame = String::from_utf8(frame.to_vec()).unwrap();
    assert!(frame.starts_with("event: notification\n"), "{frame}");
    assert!(frame.contains("\"chat_id\":7"), "{frame}");
    assert!(frame.contains("Stop working for a while"), "{frame}");

    let (_, body) = get(&app, "/chats/7/status").await;
    assert_eq!(body["task"], "long_break");
    assert_eq!(body["phase"], "idle");
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
