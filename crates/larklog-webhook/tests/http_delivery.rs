use std::collections::VecDeque;
use std::net::TcpListener as StdListener;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use larklog_card::{Button, CardBuilder, KvItem};
use larklog_webhook::{ClientConfig, DeliveryError, WebhookClient};
use serde_json::Value;

#[derive(Debug, Clone)]
struct Received {
    headers: HeaderMap,
    body: Value,
}

#[derive(Default)]
struct HookState {
    replies: Mutex<VecDeque<(u16, String)>>,
    received: Mutex<Vec<Received>>,
}

type Shared = Arc<HookState>;

async fn hook(State(state): State<Shared>, headers: HeaderMap, body: Bytes) -> (StatusCode, String) {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    state.received.lock().unwrap().push(Received { headers, body });
    let (status, reply) = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or((200, r#"{"code":0,"msg":"success"}"#.to_string()));
    (StatusCode::from_u16(status).unwrap(), reply)
}

/// Serves `/hook` on an ephemeral port from a background runtime.
fn spawn_hook(replies: Vec<(u16, &str)>) -> (String, Shared) {
    let state: Shared = Arc::new(HookState::default());
    state
        .replies
        .lock()
        .unwrap()
        .extend(replies.into_iter().map(|(status, body)| (status, body.to_string())));

    let listener = StdListener::bind("127.0.0.1:0").expect("bind");
    listener.set_nonblocking(true).expect("nonblocking");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/hook", post(hook))
        .with_state(state.clone());

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
            axum::serve(listener, app).await.expect("serve");
        });
    });

    (format!("http://{addr}/hook"), state)
}

fn fast_config(retries: u32) -> ClientConfig {
    ClientConfig::default()
        .with_timeout(Duration::from_secs(5))
        .with_retry(retries, Duration::from_millis(10))
}

#[test]
fn card_is_posted_with_headers() {
    let (url, state) = spawn_hook(Vec::new());
    let client = WebhookClient::new(url, fast_config(0).with_header("X-Trace-Id", "abc-123"));
    let card = CardBuilder::new()
        .header("ℹ️ System Monitor", "blue")
        .kv_table(&[KvItem::new("port", "8080")])
        .buttons(&[Button::new("Open", "https://example.com")])
        .build();

    client.send_card(&card).expect("delivered");

    let received = state.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let headers = &received[0].headers;
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(headers["user-agent"], "larklogger-go/1.0.0");
    assert_eq!(headers["x-trace-id"], "abc-123");
    let body = &received[0].body;
    assert_eq!(body["msg_type"], "interactive");
    assert_eq!(body["card"]["header"]["title"]["content"], "ℹ️ System Monitor");
    assert_eq!(body["card"]["config"]["wide_screen_mode"], true);
}

#[test]
fn text_message_shape() {
    let (url, state) = spawn_hook(Vec::new());
    WebhookClient::new(url, fast_config(0))
        .send_text("deploy finished")
        .expect("delivered");
    let received = state.received.lock().unwrap().clone();
    assert_eq!(
        received[0].body,
        serde_json::json!({"msg_type": "text", "content": {"text": "deploy finished"}})
    );
}

#[test]
fn server_errors_are_retried_until_success() {
    let (url, state) = spawn_hook(vec![(500, "oops"), (502, "bad gateway")]);
    WebhookClient::new(url, fast_config(3))
        .send_text("retry me")
        .expect("third attempt succeeds");
    assert_eq!(state.received.lock().unwrap().len(), 3);
}

#[test]
fn api_rejection_surfaces_code_after_retries() {
    let rejection = r#"{"code":19021,"msg":"sign match fail"}"#;
    let (url, state) = spawn_hook(vec![(200, rejection); 3]);
    let err = WebhookClient::new(url, fast_config(2))
        .send_text("x")
        .expect_err("rejected");
    assert_eq!(state.received.lock().unwrap().len(), 3);
    assert_eq!(err.attempts(), 3);
    assert!(matches!(
        err.last_cause(),
        DeliveryError::Rejected { code: 19021, .. }
    ));
}

#[test]
fn non_json_success_body_is_invalid() {
    let (url, _state) = spawn_hook(vec![(200, "ok")]);
    let err = WebhookClient::new(url, fast_config(0))
        .send_text("x")
        .expect_err("invalid body");
    assert!(matches!(err.last_cause(), DeliveryError::InvalidResponse(_)));
}

#[test]
fn unreachable_host_is_a_transport_error() {
    let port = {
        let listener = StdListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let err = WebhookClient::new(format!("http://127.0.0.1:{port}/hook"), fast_config(1))
        .send_text("x")
        .expect_err("nobody listening");
    assert_eq!(err.attempts(), 2);
    assert!(matches!(err.last_cause(), DeliveryError::Transport(_)));
}
