//! Test helpers: a local webhook receiver for webhook tests

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// A request captured by [`spawn_webhook_receiver`]
#[derive(Debug)]
pub(crate) struct CapturedRequest {
    pub content_type: String,
    pub body: Value,
}

#[derive(Clone)]
struct ReceiverState {
    status: StatusCode,
    captured: Arc<Mutex<Option<oneshot::Sender<CapturedRequest>>>>,
}

async fn capture_report(
    State(state): State<ReceiverState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let sender = state.captured.lock().unwrap().take();
    if let Some(sender) = sender {
        let _ = sender.send(CapturedRequest { content_type, body });
    }
    state.status
}

/// Serve `POST /report` on a local port, answering with `status`
///
/// Returns the URL to post to and a receiver resolving to the first request.
pub(crate) async fn spawn_webhook_receiver(
    status: u16,
) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}/report", listener.local_addr().unwrap());

    let (tx, rx) = oneshot::channel();
    let state = ReceiverState {
        status: StatusCode::from_u16(status).unwrap(),
        captured: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/report", post(capture_report))
        .with_state(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, rx)
}

/// URL on a local port with nothing listening
pub(crate) async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = format!("http://{}/report", listener.local_addr().unwrap());
    drop(listener);
    address
}
