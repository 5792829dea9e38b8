//! UseCase: チャットメッセージ送信
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - `@name 本文` は名前が一致する接続にだけ、それ以外はルーム（またはルーム外の全員）に配送
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム内のブロードキャスト（送信者には返さない）
//! - 正常系：メンション（宛先にだけ、direct として届く）
//! - エッジケース：存在しない名前へのメンション（誰にも届かない）

use std::sync::Arc;

use crate::domain::{
    ChatDelivery, ConnectionId, MessageContent, MessagePusher, Notification, SessionRepository,
};

use super::{error::UseCaseError, notify::broadcast_or_log};

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn SessionRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Returns
    ///
    /// * `Ok(ChatDelivery)` - 配送したメッセージと宛先
    /// * `Err(UseCaseError)` - 送信者が登録されていない
    pub async fn execute(
        &self,
        from: ConnectionId,
        content: MessageContent,
    ) -> Result<ChatDelivery, UseCaseError> {
        let delivery = self.repository.post_chat(&from, content).await?;

        if delivery.direct {
            tracing::info!(
                "Direct message from '{}' to {} recipient(s)",
                from,
                delivery.recipients.len()
            );
        }

        broadcast_or_log(
            self.message_pusher.as_ref(),
            delivery.recipients.clone(),
            Notification::Chat {
                message: delivery.message.clone(),
                direct: delivery.direct,
            },
        )
        .await;

        Ok(delivery)
    }
}
