//! End-to-end tests of the HTTP command surface over the tokio runtime

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use ring_timer::{
    api::create_router,
    engine::{Playback, PlaybackError},
    state::AppState,
    tasks::{start_timer_runtime, RuntimeOptions},
};
use serde_json::{json, Value};
use tokio::time::sleep;
use tower::ServiceExt;

#[derive(Debug, Clone, Default)]
struct SharedPlayback(Arc<Mutex<bool>>);

impl SharedPlayback {
    fn playing(&self) -> bool {
        *self.0.lock().unwrap()
    }
}

impl Playback for SharedPlayback {
    fn rewind(&mut self) {}

    fn play(&mut self) -> Result<(), PlaybackError> {
        *self.0.lock().unwrap() = true;
        Ok(())
    }

    fn pause(&mut self) {
        *self.0.lock().unwrap() = false;
    }
}

fn app(playback: &SharedPlayback) -> (Router, Arc<AppState>) {
    let state = start_timer_runtime(
        20554,
        "127.0.0.1".to_string(),
        RuntimeOptions::default(),
        Box::new(playback.clone()),
    );
    (create_router(Arc::clone(&state)), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn post(app: &Router, uri: &str) -> Value {
    let (status, body) = send(app, "POST", uri, None).await;
    assert_eq!(status, StatusCode::OK, "POST {} failed", uri);
    body
}

#[tokio::test(start_paused = true)]
async fn health_reports_ok() {
    let (app, _state) = app(&SharedPlayback::default());
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn plus_minus_follow_selected_field() {
    let (app, _state) = app(&SharedPlayback::default());

    post(&app, "/plus").await;
    post(&app, "/select/minutes").await;
    post(&app, "/plus").await;
    post(&app, "/plus").await;
    let body = post(&app, "/minus").await;

    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["display"], "01:01:00");
    assert_eq!(body["timer"]["selected_field"], "minutes");
}

#[tokio::test(start_paused = true)]
async fn selecting_seconds_keeps_cursor() {
    let (app, _state) = app(&SharedPlayback::default());
    post(&app, "/select/minutes").await;
    let body = post(&app, "/select/seconds").await;

    assert_eq!(body["timer"]["selected_field"], "minutes");
}

#[tokio::test(start_paused = true)]
async fn short_field_names_match_everywhere() {
    let (app, _state) = app(&SharedPlayback::default());

    let body = post(&app, "/select/mm").await;
    assert_eq!(body["timer"]["selected_field"], "minutes");

    let body = post(&app, "/select/hh").await;
    assert_eq!(body["timer"]["selected_field"], "hours");

    let (status, body) = send(&app, "POST", "/configure", Some(json!({ "field": "mm", "delta": 4 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "00:04:00");
}

#[tokio::test(start_paused = true)]
async fn unknown_field_is_rejected() {
    let (app, _state) = app(&SharedPlayback::default());
    let (status, _) = send(&app, "POST", "/select/days", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn minutes_clamp_through_configure() {
    let (app, _state) = app(&SharedPlayback::default());
    let (status, body) = send(
        &app,
        "POST",
        "/configure",
        Some(json!({ "field": "minutes", "delta": 75 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "00:59:00");
    assert_eq!(body["timer"]["preset_seconds"], 3540);
}

#[tokio::test(start_paused = true)]
async fn full_countdown_alarm_and_stop() {
    let playback = SharedPlayback::default();
    let (app, _state) = app(&playback);
    send(&app, "POST", "/configure", Some(json!({ "field": "minutes", "delta": 2 }))).await;

    let body = post(&app, "/toggle").await;
    assert_eq!(body["status"], "running");
    assert_eq!(body["timer"]["control"], "pause");

    // Commands that do not apply are ignored
    let body = post(&app, "/plus").await;
    assert_eq!(body["timer"]["preset_seconds"], 120);

    sleep(Duration::from_secs(121)).await;
    let (_, status) = send(&app, "GET", "/status", None).await;
    assert_eq!(status["timer"]["state"], "alarming");
    assert_eq!(status["timer"]["display"], "00:00:00");
    assert_eq!(status["timer"]["control"], "stop");
    assert_eq!(status["view"]["ring"]["fraction"], 0.0);
    assert!(playback.playing());

    let body = post(&app, "/start").await;
    assert_eq!(body["status"], "alarming");

    let body = post(&app, "/toggle").await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["display"], "00:02:00");
    assert!(!playback.playing());
}

#[tokio::test(start_paused = true)]
async fn pause_and_reset() {
    let (app, _state) = app(&SharedPlayback::default());
    send(&app, "POST", "/configure", Some(json!({ "field": "minutes", "delta": 1 }))).await;
    post(&app, "/start").await;

    sleep(Duration::from_secs(30)).await;
    let body = post(&app, "/pause").await;
    assert_eq!(body["status"], "paused");
    let remaining = body["timer"]["remaining_seconds"].as_u64().unwrap();
    assert!((30..=31).contains(&remaining));

    let body = post(&app, "/reset").await;
    assert_eq!(body["status"], "idle");
    assert_eq!(body["timer"]["display"], "00:01:00");
    assert_eq!(body["timer"]["fraction"], 1.0);

    let (_, status) = send(&app, "GET", "/status", None).await;
    assert_eq!(status["last_action"], "reset");
    assert_eq!(status["view"]["digits"]["minutes"], "01");
}

#[tokio::test(start_paused = true)]
async fn alarm_silences_after_ceiling() {
    let playback = SharedPlayback::default();
    let (app, state) = app(&playback);
    send(&app, "POST", "/configure", Some(json!({ "field": "minutes", "delta": 1 }))).await;
    post(&app, "/start").await;

    sleep(Duration::from_secs(61)).await;
    assert!(playback.playing());

    sleep(Duration::from_secs(60)).await;
    assert!(!playback.playing());
    let snapshot = state.get_snapshot().unwrap();
    assert!(!snapshot.alarm_sounding);
    assert_eq!(snapshot.state.as_str(), "idle");

    // The duration can be set again right away
    let (_, body) = send(&app, "POST", "/configure", Some(json!({ "field": "minutes", "delta": 3 }))).await;
    assert_eq!(body["timer"]["display"], "00:03:00");
}
