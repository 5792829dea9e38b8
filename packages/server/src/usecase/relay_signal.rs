//! UseCase: シグナリングの中継
//!
//! SDP offer/answer や ICE candidate を中身を見ずに宛先へ転送する。
//! 宛先が同じルームにいない・接続していない場合は黙って捨てる。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notification, SessionRepository, SignalPayload};

use super::{error::UseCaseError, notify::push_or_log};

/// シグナル中継のユースケース
pub struct RelaySignalUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelaySignalUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        from: ConnectionId,
        to: ConnectionId,
        payload: SignalPayload,
    ) -> Result<(), UseCaseError> {
        if let Err(e) = self.repository.route_signal(&from, &to).await {
            tracing::debug!("Dropped signal from '{}' to '{}': {}", from, to, e);
            return Err(e.into());
        }

        push_or_log(
            self.message_pusher.as_ref(),
            &to,
            Notification::Signal { from, payload },
        )
        .await;
        Ok(())
    }
}
