//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 切断に伴う後片付け（待機列の削除、退出通知、ホスト移譲、画面共有の解除）
//!
//! ### なぜこのテストが必要か
//! - 切断はいつでも起こり得るため、どの状態からでも整合性を保つ必要がある
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの切断（user-left）
//! - 正常系：ホストの切断（host-changed と保留リクエストの再送）
//! - 正常系：待機者の切断（ホストに join-request-withdrawn）
//! - エッジケース：最後のメンバーの切断（ルーム削除、待機者に join-rejected）

use std::sync::Arc;

use crate::domain::{ClosedConnection, ConnectionId, MessagePusher, Notification, SessionRepository};

use super::{departure::announce_departure, notify::push_or_log};

/// 切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 切断を実行（未登録の接続でも失敗しない）
    pub async fn execute(&self, connection_id: ConnectionId) -> ClosedConnection {
        let closed = self.repository.close_connection(&connection_id).await;
        self.message_pusher.unregister_client(&connection_id).await;

        let pusher = self.message_pusher.as_ref();
        for withdrawn in &closed.withdrawn_requests {
            if let Some(host) = &withdrawn.host {
                push_or_log(
                    pusher,
                    host,
                    Notification::JoinRequestWithdrawn {
                        room: withdrawn.room.clone(),
                        identity: withdrawn.requester.clone(),
                    },
                )
                .await;
            }
        }

        if let Some(departure) = closed.departure.clone() {
            announce_departure(pusher, departure).await;
        }

        match &closed.connection {
            Some(connection) => tracing::info!(
                "'{}' ({}) disconnected after {:.1}s online",
                connection.display_name,
                connection_id,
                closed.online_millis as f64 / 1000.0
            ),
            None => tracing::debug!("Unknown connection '{}' closed", connection_id),
        }

        closed
    }
}
