//! UseCase: 入室許可
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AdmitParticipantUseCase::execute() メソッド
//! - 許可された本人への `room-joined` と、ルーム全員への `user-joined`
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストが待機者を許可する
//! - 正常系：画面共有中のルームに入ると共有者が伝えられる
//! - 異常系：ホスト以外が許可しようとする（action-denied）

use std::sync::Arc;

use crate::domain::{
    Admission, ConnectionId, MessagePusher, Notification, RoomKey, SessionRepository,
};

use super::{
    error::UseCaseError,
    notify::{broadcast_or_log, deny, push_or_log},
};

/// 入室許可のユースケース
pub struct AdmitParticipantUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl AdmitParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// `acting` が `room` の待機者 `requester` を許可する
    pub async fn execute(
        &self,
        acting: ConnectionId,
        room: RoomKey,
        requester: ConnectionId,
    ) -> Result<Admission, UseCaseError> {
        let admission = match self.repository.admit(&room, &requester, &acting).await {
            Ok(admission) => admission,
            Err(e) => {
                deny(self.message_pusher.as_ref(), &acting, "admit-user", &e).await;
                return Err(e.into());
            }
        };
        tracing::info!("'{}' admitted '{}' to room '{}'", acting, requester, room);

        let pusher = self.message_pusher.as_ref();
        push_or_log(
            pusher,
            &requester,
            Notification::RoomJoined {
                room: admission.room.clone(),
                is_host: false,
                display_name: admission.admitted.display_name.clone(),
            },
        )
        .await;

        // 新メンバーは既存メンバー全員を、既存メンバーは新メンバーを知る
        broadcast_or_log(
            pusher,
            admission.members.iter().map(|m| m.id.clone()).collect(),
            Notification::UserJoined {
                joined: admission.admitted.clone(),
                members: admission.members.clone(),
            },
        )
        .await;

        if let Some(holder) = &admission.screen_sharer {
            push_or_log(
                pusher,
                &requester,
                Notification::ScreenShareStarted {
                    holder: holder.clone(),
                },
            )
            .await;
        }

        Ok(admission)
    }
}
