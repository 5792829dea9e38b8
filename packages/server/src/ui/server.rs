//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use kaigi_shared::time::SystemClock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    domain::{Coordinator, MessagePusher, SessionRepository},
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemorySessionRepository},
    usecase::{GetRoomDetailUseCase, GetRoomsUseCase},
};

use super::{
    dispatcher::EventDispatcher,
    handler::{debug_rooms, get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Signaling server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl Server {
    /// Wire the in-memory repository and the WebSocket pusher.
    pub fn new(config: ServerConfig) -> Self {
        let coordinator = Coordinator::new(Arc::new(SystemClock))
            .with_chat_history_limit(config.chat_history_limit);
        Self {
            repository: Arc::new(InMemorySessionRepository::new(coordinator)),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
            config,
        }
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Signaling server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let dispatcher = EventDispatcher::new(self.repository.clone(), self.message_pusher);
        let (events, dispatcher_task) = dispatcher.spawn();

        let app_state = Arc::new(AppState {
            events,
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(self.repository.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(self.repository)),
        });

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/debug/rooms", get(debug_rooms))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{*room_key}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await;

        // The router (and its event senders) is gone once serve returns.
        dispatcher_task.abort();
        result
    }
}
