#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use nlweb_bridge::bridge::NlwebBridge;
use nlweb_bridge::config::BackendConfig;
use nlweb_bridge::rpc::BackendForwarder;
use nlweb_bridge::truncate::Truncator;
use serde_json::{json, Value};

/// What the mock backend sends back for a request.
pub enum Reply {
    /// 200 with `{"jsonrpc":"2.0","id":1,"result":<value>}`.
    Result(Value),
    /// 200 with `{"jsonrpc":"2.0","id":1,"error":<value>}`.
    Error(Value),
    /// Arbitrary status and raw body.
    Raw(u16, String),
    /// Like [`Reply::Result`], but only after sleeping for the given delay.
    Slow(Duration, Value),
}

type Responder = Arc<dyn Fn(&Value) -> Reply + Send + Sync>;

#[derive(Clone)]
struct MockState {
    responder: Responder,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// A fake NLWeb server listening on an ephemeral port.
pub struct MockBackend {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockBackend {
    /// Start a backend serving `POST /mcp`, answering each JSON-RPC request with `responder`.
    pub async fn start(responder: impl Fn(&Value) -> Reply + Send + Sync + 'static) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            responder: Arc::new(responder),
            requests: Arc::clone(&requests),
        };

        let app = Router::new().route("/mcp", post(handle)).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{addr}"),
            requests,
        }
    }

    /// Every request body received so far, in order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn backend_config(&self) -> BackendConfig {
        backend_config(&self.url)
    }

    pub fn forwarder(&self) -> BackendForwarder {
        BackendForwarder::new(&self.backend_config()).unwrap()
    }

    pub fn bridge(&self) -> NlwebBridge {
        NlwebBridge::new(Arc::new(self.forwarder()), Truncator::default())
    }
}

async fn handle(State(state): State<MockState>, body: String) -> Response {
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    state.requests.lock().unwrap().push(request.clone());

    let reply = (state.responder)(&request);
    if let Reply::Slow(delay, _) = &reply {
        tokio::time::sleep(*delay).await;
    }

    let (status, body) = match reply {
        Reply::Result(result) | Reply::Slow(_, result) => (
            200,
            json!({"jsonrpc": "2.0", "id": 1, "result": result}).to_string(),
        ),
        Reply::Error(error) => (
            200,
            json!({"jsonrpc": "2.0", "id": 1, "error": error}).to_string(),
        ),
        Reply::Raw(status, body) => (status, body),
    };

    let status = StatusCode::from_u16(status).unwrap();
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

pub fn backend_config(url: &str) -> BackendConfig {
    BackendConfig {
        url: url.to_string(),
        endpoint: "/mcp".into(),
        timeout_secs: 5,
    }
}

/// Base URL of a port nothing listens on, so connections are refused.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

/// Bridge pointed at [`unreachable_url`].
pub fn unreachable_bridge() -> NlwebBridge {
    let forwarder = BackendForwarder::new(&backend_config(&unreachable_url())).unwrap();
    NlwebBridge::new(Arc::new(forwarder), Truncator::default())
}

/// A `{"type":"text","text":...}` content item with `len` characters of text.
pub fn text_item(len: usize, fill: char) -> Value {
    json!({"type": "text", "text": fill.to_string().repeat(len)})
}
