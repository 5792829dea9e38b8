//! UseCase: ビデオのオン/オフをルームに伝える

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notification, SessionRepository};

use super::{error::UseCaseError, notify::broadcast_or_log};

pub struct ToggleVideoUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ToggleVideoUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 同じルームの他のメンバーに通知し、通知先を返す
    pub async fn execute(
        &self,
        identity: ConnectionId,
        enabled: bool,
    ) -> Result<Vec<ConnectionId>, UseCaseError> {
        let (_, peers) = self.repository.peers_of(&identity).await?;
        broadcast_or_log(
            self.message_pusher.as_ref(),
            peers.clone(),
            Notification::VideoToggle { identity, enabled },
        )
        .await;
        Ok(peers)
    }
}
