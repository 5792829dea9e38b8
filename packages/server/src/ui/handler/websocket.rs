//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, ConnectionIdFactory},
    infrastructure::dto::websocket::ClientMessage,
    ui::{
        dispatcher::{EventSender, InboundEvent},
        state::AppState,
    },
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the channel closes (the connection was unregistered)
/// or the socket refuses a write.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

/// Reads client frames and forwards them to the dispatcher.
fn receiver_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    events: EventSender,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::trace!("Received text from '{}': {}", connection_id, text);
                    let message = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(message) => message,
                        Err(e) => {
                            tracing::warn!(
                                "Dropped malformed frame from '{}': {}",
                                connection_id,
                                e
                            );
                            continue;
                        }
                    };
                    let event = InboundEvent::Message {
                        connection_id: connection_id.clone(),
                        message,
                    };
                    if events.send(event).is_err() {
                        tracing::error!("Event dispatcher is gone, closing '{}'", connection_id);
                        break;
                    }
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping from '{}'", connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionIdFactory::generate();
    let (sender, receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    if state
        .events
        .send(InboundEvent::Connected {
            connection_id: connection_id.clone(),
            sender: tx,
        })
        .is_err()
    {
        tracing::error!("Event dispatcher is gone, refusing '{}'", connection_id);
        return;
    }
    tracing::info!("Client '{}' connected", connection_id);

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receiver_loop(receiver, state.events.clone(), connection_id.clone());

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    if state
        .events
        .send(InboundEvent::Disconnected {
            connection_id: connection_id.clone(),
        })
        .is_err()
    {
        tracing::warn!("Event dispatcher is gone, '{}' not cleaned up", connection_id);
    }
}
