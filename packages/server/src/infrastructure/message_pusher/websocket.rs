//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - ドメインの [`Notification`] を JSON フレームに変換して送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、フレームの送信だけを担当します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの sender
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 通知を送信用の JSON 文字列に変換
    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        let message = ServerMessage::from(notification.clone());
        serde_json::to_string(&message).map_err(|e| MessagePushError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Client '{}' registered to MessagePusher", client_id);
        clients.insert(client_id, sender);
    }

    async fn unregister_client(&self, client_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(client_id);
        tracing::debug!("Client '{}' unregistered from MessagePusher", client_id);
    }

    async fn push_to(
        &self,
        client_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(client_id)
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", notification.kind(), client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = Self::encode(notification)?;
        let clients = self.clients.lock().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(frame.clone()) {
                        tracing::warn!("Failed to push message to client '{}': {}", target, e);
                    } else {
                        tracing::debug!(
                            "Broadcasted '{}' to client '{}'",
                            notification.kind(),
                            target
                        );
                    }
                }
                None => {
                    tracing::warn!("Client '{}' not found during broadcast, skipping", target);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - 通知が JSON フレームとして正しいクライアントに届くこと
    // - 存在しないクライアント・切断済みチャンネルの扱い
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース（フレームの中身も確認）
    // 2. push_to の失敗ケース（未登録 / 受信側がドロップ済み）
    // 3. broadcast の部分失敗ケース
    // 4. 登録解除後は届かない
    // ========================================

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn user_left(value: &str) -> Notification {
        Notification::UserLeft {
            identity: id(value),
        }
    }

    fn parse(frame: Option<String>) -> Value {
        serde_json::from_str(&frame.unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定のクライアントに JSON フレームを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx).await;

        // when (操作):
        let result = pusher.push_to(&id("alice"), &user_left("bob")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            parse(rx.recv().await),
            json!({"type": "user-left", "identity": "bob"})
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しないクライアントへの送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();

        // when (操作):
        let result = pusher.push_to(&id("nobody"), &user_left("bob")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(MessagePushError::ClientNotFound("nobody".to_string()))
        );
    }

    #[tokio::test]
    async fn test_push_to_closed_channel() {
        // テスト項目: 受信側が閉じたチャンネルへの送信は PushFailed
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, rx) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&id("alice"), &user_left("bob")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: ブロードキャスト時、一部のクライアントが存在しなくても成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx1).await;
        pusher.register_client(id("bob"), tx2).await;

        // when (操作):
        let targets = vec![id("alice"), id("ghost"), id("bob")];
        let result = pusher.broadcast(targets, &user_left("carol")).await;

        // then (期待する結果):
        assert!(result.is_ok());
        let expected = json!({"type": "user-left", "identity": "carol"});
        assert_eq!(parse(rx1.recv().await), expected);
        assert_eq!(parse(rx2.recv().await), expected);
    }

    #[tokio::test]
    async fn test_unregister_client() {
        // テスト項目: 登録解除したクライアントには送信できない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        pusher.register_client(id("alice"), tx).await;

        // when (操作):
        pusher.unregister_client(&id("alice")).await;
        let result = pusher.push_to(&id("alice"), &user_left("bob")).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }
}
