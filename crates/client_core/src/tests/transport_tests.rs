use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::domain::{Conversation, Turn};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone)]
enum Reply {
    Json(Value),
    Status(StatusCode),
    Raw(&'static str),
}

#[derive(Clone)]
struct ServerState {
    reply: Reply,
    bodies: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

async fn handle_chat(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.content_types.lock().await.push(content_type);
    if let Ok(value) = serde_json::from_str::<Value>(&body) {
        state.bodies.lock().await.push(value);
    }

    match state.reply {
        Reply::Json(value) => Json(value).into_response(),
        Reply::Status(code) => (code, Json(json!({ "result": "ignored on failure" }))).into_response(),
        Reply::Raw(text) => ([(header::CONTENT_TYPE, "application/json")], text).into_response(),
    }
}

async fn spawn_chat_server(reply: Reply) -> anyhow::Result<(String, ServerState)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState {
        reply,
        bodies: Arc::new(Mutex::new(Vec::new())),
        content_types: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/api/chat", post(handle_chat))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn sample_request() -> ChatRequest {
    let mut conversation = Conversation::new();
    conversation.push(Turn::user("hello"));
    conversation.push(Turn::model("hi"));
    conversation.push(Turn::user("how are you?"));
    ChatRequest::new(conversation)
}

#[tokio::test]
async fn posts_entire_conversation_as_json() {
    let (server_url, state) = spawn_chat_server(Reply::Json(json!({ "result": "fine" })))
        .await
        .expect("spawn server");
    let transport = HttpChatTransport::new(&server_url).expect("transport");

    let response = transport.send(&sample_request()).await.expect("send");
    assert_eq!(response.reply(), Some("fine"));

    let bodies = state.bodies.lock().await;
    assert_eq!(
        bodies.as_slice(),
        [json!({
            "conversation": [
                { "role": "user", "text": "hello" },
                { "role": "model", "text": "hi" },
                { "role": "user", "text": "how are you?" },
            ]
        })]
    );
    let content_types = state.content_types.lock().await;
    assert_eq!(content_types.as_slice(), ["application/json"]);
}

#[tokio::test]
async fn non_success_status_is_a_failure_regardless_of_body() {
    let (server_url, _state) = spawn_chat_server(Reply::Status(StatusCode::INTERNAL_SERVER_ERROR))
        .await
        .expect("spawn server");
    let transport = HttpChatTransport::new(&server_url).expect("transport");

    let err = transport
        .send(&sample_request())
        .await
        .expect_err("500 must fail");
    assert!(matches!(err, ChatError::Status(500)));
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "Server error: 500");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let (server_url, _state) = spawn_chat_server(Reply::Raw("<html>oops</html>"))
        .await
        .expect("spawn server");
    let transport = HttpChatTransport::new(&server_url).expect("transport");

    let err = transport
        .send(&sample_request())
        .await
        .expect_err("non-json must fail");
    assert!(matches!(err, ChatError::Decode(_)));
}

#[tokio::test]
async fn missing_result_field_is_not_an_error() {
    let (server_url, _state) = spawn_chat_server(Reply::Json(json!({ "detail": "nothing" })))
        .await
        .expect("spawn server");
    let transport = HttpChatTransport::new(&server_url).expect("transport");

    let response = transport.send(&sample_request()).await.expect("send");
    assert_eq!(response.result, None);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport = HttpChatTransport::new(&format!("http://{addr}")).expect("transport");
    let err = transport
        .send(&sample_request())
        .await
        .expect_err("closed port must fail");
    assert!(matches!(err, ChatError::Transport(_)));
    assert_eq!(err.status(), None);
}

#[test]
fn endpoint_path_is_rooted_at_server_origin() {
    assert_eq!(
        chat_endpoint("http://127.0.0.1:8080").expect("url").as_str(),
        "http://127.0.0.1:8080/api/chat"
    );
    assert_eq!(
        chat_endpoint(" https://chat.example.com/app/ ").expect("url").as_str(),
        "https://chat.example.com/api/chat"
    );
}

#[test]
fn rejects_unusable_server_urls() {
    assert!(matches!(
        chat_endpoint("not a url"),
        Err(ChatError::InvalidEndpoint { .. })
    ));
    assert!(matches!(
        chat_endpoint("mailto:someone@example.com"),
        Err(ChatError::InvalidEndpoint { .. })
    ));
}
