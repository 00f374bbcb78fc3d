//! Chat WebSocket. Anonymous sockets receive the event stream read-only;
//! authenticated sockets (via `?token=`) also count toward presence and may
//! post or delete through the same connection.

use axum::extract::ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};
use uuid::Uuid;

use domains::models::{ChatEvent, UserIdentity};

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    token: Option<String>,
}

/// Frames a connected client may send. Everything else is ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ClientFrame {
    Post { body: String },
    Delete { id: Uuid },
}

pub async fn chat_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(query): Query<WsQuery>,
) -> impl IntoResponse {
    // A bad token downgrades to an anonymous, read-only socket rather than
    // failing the upgrade; the client learns about it on the first write.
    let identity = query
        .token
        .as_deref()
        .and_then(|token| state.auth.authenticate(token).ok());
    ws.on_upgrade(move |socket| run(socket, state, identity))
}

type WsSink = SplitSink<WebSocket, Message>;
type WsStream = SplitStream<WebSocket>;

async fn run(socket: WebSocket, state: AppState, identity: Option<UserIdentity>) {
    let connection_id = Uuid::new_v4();
    let mut events = state.chat.subscribe();
    let (mut sink, mut stream) = socket.split();
    state.metrics.chat_connections.inc();

    if let Some(user) = &identity {
        state.chat.join(connection_id, user.id);
    } else {
        // Anonymous viewers still want the current count on connect.
        let snapshot = ChatEvent::Presence {
            online: state.chat.online_count(),
        };
        if send_event(&mut sink, &snapshot).await.is_err() {
            state.metrics.chat_connections.dec();
            return;
        }
    }

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    if send_event(&mut sink, &event).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // The client resynchronises from GET /api/chat/messages;
                    // the keyed feed tolerates the gap.
                    warn!(connection = %connection_id, skipped, "chat subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            },
            frame = next_frame(&mut stream) => match frame {
                Some(Ok(Message::Text(text))) => {
                    handle_frame(&mut sink, &state, identity.as_ref(), &text).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(err)) => {
                    debug!(connection = %connection_id, error = %err, "chat socket error");
                    break;
                }
            },
        }
    }

    if identity.is_some() {
        state.chat.leave(connection_id);
    }
    state.metrics.chat_connections.dec();
}

async fn next_frame(stream: &mut WsStream) -> Option<Result<Message, axum::Error>> {
    stream.next().await
}

async fn handle_frame(
    sink: &mut WsSink,
    state: &AppState,
    identity: Option<&UserIdentity>,
    text: &str,
) {
    let frame: ClientFrame = match serde_json::from_str(text) {
        Ok(frame) => frame,
        Err(_) => {
            let _ = send_error(sink, "unrecognized frame").await;
            return;
        }
    };
    let outcome = match frame {
        ClientFrame::Post { body } => state.chat.post(identity, &body).await.map(|_| ()),
        ClientFrame::Delete { id } => state.chat.delete(identity, id).await,
    };
    if let Err(err) = outcome {
        let _ = send_error(sink, &err.to_string()).await;
    }
}

async fn send_event(sink: &mut WsSink, event: &ChatEvent) -> Result<(), axum::Error> {
    let payload = serde_json::to_string(event).unwrap_or_default();
    sink.send(Message::Text(Utf8Bytes::from(payload))).await
}

async fn send_error(sink: &mut WsSink, message: &str) -> Result<(), axum::Error> {
    let payload = serde_json::json!({ "type": "error", "error": message }).to_string();
    sink.send(Message::Text(Utf8Bytes::from(payload))).await
}
