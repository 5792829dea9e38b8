//! MessagePusher trait 定義
//!
//! クライアントへの通知送信のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::{notification::Notification, value_object::ConnectionId};

/// クライアントへの送信チャンネル（シリアライズ済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 通知送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),

    #[error("failed to serialize message: {0}")]
    Serialization(String),
}

/// 通知の送信先を管理し、通知を届ける
///
/// 送信は fire-and-forget で、相手の受信確認は待たない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 特定のクライアントに通知
    async fn push_to(
        &self,
        client_id: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 複数のクライアントに通知（一部の送信失敗は許容）
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
