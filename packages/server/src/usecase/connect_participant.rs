//! UseCase: 接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 接続の登録、送信チャンネルの登録、`connected` 通知
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続で自分の identity が通知される
//! - 異常系：通知の送信に失敗した場合はエラーを返す

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PusherChannel, SessionRepository, Timestamp,
};

use super::error::UseCaseError;

/// 接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 接続を登録し、クライアントに自分の identity を知らせる
    ///
    /// # Returns
    ///
    /// * `Ok(Timestamp)` - 接続時刻
    /// * `Err(UseCaseError)` - `connected` 通知の送信に失敗
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<Timestamp, UseCaseError> {
        let joined_at = self.repository.connect(connection_id.clone()).await;
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;
        self.message_pusher
            .push_to(
                &connection_id,
                &Notification::Connected {
                    identity: connection_id.clone(),
                },
            )
            .await?;

        tracing::info!("Connection '{}' registered", connection_id);
        Ok(joined_at)
    }
}
