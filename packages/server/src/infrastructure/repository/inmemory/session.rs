//! InMemory Session Repository 実装
//!
//! ドメイン層が定義する SessionRepository trait の具体的な実装。
//! [`Coordinator`] を 1 つの Mutex で保護し、各メソッドはロックを保持したまま
//! 1 回の状態遷移を完了させます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Admission, ChatDelivery, ClosedConnection, ConnectionId, Coordinator, Departure, DisplayName,
    JoinOutcome, MessageContent, Rejection, Room, RoomDetail, RoomKey, SessionError,
    SessionRepository, ShareStarted, ShareStopped, Timestamp,
};

/// インメモリ Session Repository 実装
pub struct InMemorySessionRepository {
    coordinator: Arc<Mutex<Coordinator>>,
}

impl InMemorySessionRepository {
    /// 新しい InMemorySessionRepository を作成
    pub fn new(coordinator: Coordinator) -> Self {
        Self {
            coordinator: Arc::new(Mutex::new(coordinator)),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn connect(&self, id: ConnectionId) -> Timestamp {
        self.coordinator.lock().await.connect(id)
    }

    async fn request_join(
        &self,
        key: RoomKey,
        id: &ConnectionId,
        display_name: DisplayName,
    ) -> Result<JoinOutcome, SessionError> {
        self.coordinator
            .lock()
            .await
            .request_join(key, id, display_name)
    }

    async fn admit(
        &self,
        key: &RoomKey,
        requester: &ConnectionId,
        acting: &ConnectionId,
    ) -> Result<Admission, SessionError> {
        self.coordinator.lock().await.admit(key, requester, acting)
    }

    async fn reject(
        &self,
        key: &RoomKey,
        requester: &ConnectionId,
        acting: &ConnectionId,
    ) -> Result<Rejection, SessionError> {
        self.coordinator.lock().await.reject(key, requester, acting)
    }

    async fn kick(
        &self,
        acting: &ConnectionId,
        target: &ConnectionId,
    ) -> Result<Departure, SessionError> {
        self.coordinator.lock().await.kick(acting, target)
    }

    async fn route_signal(
        &self,
        from: &ConnectionId,
        to: &ConnectionId,
    ) -> Result<(), SessionError> {
        self.coordinator.lock().await.route_signal(from, to)
    }

    async fn peers_of(
        &self,
        from: &ConnectionId,
    ) -> Result<(RoomKey, Vec<ConnectionId>), SessionError> {
        self.coordinator.lock().await.peers_of(from)
    }

    async fn request_share(&self, id: &ConnectionId) -> Result<ShareStarted, SessionError> {
        self.coordinator.lock().await.request_share(id)
    }

    async fn stop_share(&self, id: &ConnectionId) -> Result<Option<ShareStopped>, SessionError> {
        self.coordinator.lock().await.stop_share(id)
    }

    async fn post_chat(
        &self,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatDelivery, SessionError> {
        self.coordinator.lock().await.post_chat(from, content)
    }

    async fn close_connection(&self, id: &ConnectionId) -> ClosedConnection {
        self.coordinator.lock().await.close_connection(id)
    }

    async fn get_rooms(&self) -> Vec<Room> {
        self.coordinator.lock().await.rooms()
    }

    async fn get_room_detail(&self, key: &RoomKey) -> Option<RoomDetail> {
        self.coordinator.lock().await.room_detail(key)
    }

    async fn count_connections(&self) -> usize {
        self.coordinator.lock().await.registry().len()
    }
}
