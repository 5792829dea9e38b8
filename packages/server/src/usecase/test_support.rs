//! UseCase テスト用のヘルパー

use std::sync::Arc;

use async_trait::async_trait;
use kaigi_shared::time::FixedClock;
use tokio::sync::Mutex;

use crate::{
    domain::{
        ConnectionId, Coordinator, DisplayName, MessagePushError, MessagePusher, Notification,
        PusherChannel, RoomKey, SessionRepository,
    },
    infrastructure::repository::InMemorySessionRepository,
};

/// 送信された通知を宛先ごとに記録する MessagePusher
#[derive(Default)]
pub(crate) struct RecordingPusher {
    sent: Mutex<Vec<(ConnectionId, Notification)>>,
    registered: Mutex<Vec<ConnectionId>>,
}

impl RecordingPusher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// 記録をすべて取り出す
    pub(crate) async fn take(&self) -> Vec<(ConnectionId, Notification)> {
        std::mem::take(&mut *self.sent.lock().await)
    }

    /// 指定した宛先に届いた通知（記録は残す）
    pub(crate) async fn sent_to(&self, id: &ConnectionId) -> Vec<Notification> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(to, _)| to == id)
            .map(|(_, notification)| notification.clone())
            .collect()
    }

    pub(crate) async fn registered(&self) -> Vec<ConnectionId> {
        self.registered.lock().await.clone()
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_client(&self, client_id: ConnectionId, _sender: PusherChannel) {
        self.registered.lock().await.push(client_id);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        self.registered.lock().await.retain(|id| id != client_id);
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        self.sent
            .lock()
            .await
            .push((client_id.clone(), notification.clone()));
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let mut sent = self.sent.lock().await;
        for target in targets {
            sent.push((target, notification.clone()));
        }
        Ok(())
    }
}

pub(crate) fn id(value: &str) -> ConnectionId {
    ConnectionId::new(value.to_string()).unwrap()
}

pub(crate) fn key(value: &str) -> RoomKey {
    RoomKey::new(value.to_string()).unwrap()
}

pub(crate) fn name(value: &str) -> DisplayName {
    DisplayName::new(value.to_string()).unwrap()
}

pub(crate) fn create_test_repository() -> Arc<InMemorySessionRepository> {
    Arc::new(InMemorySessionRepository::new(Coordinator::new(Arc::new(
        FixedClock::new(1000),
    ))))
}

/// `host` がホスト、`guests` が許可済みメンバーのルームを用意する（表示名は ID と同じ）
pub(crate) async fn setup_room(
    repository: &InMemorySessionRepository,
    room: &str,
    host: &str,
    guests: &[&str],
) {
    repository.connect(id(host)).await;
    repository
        .request_join(key(room), &id(host), name(host))
        .await
        .unwrap();
    for guest in guests {
        repository.connect(id(guest)).await;
        repository
            .request_join(key(room), &id(guest), name(guest))
            .await
            .unwrap();
        repository
            .admit(&key(room), &id(guest), &id(host))
            .await
            .unwrap();
    }
}
