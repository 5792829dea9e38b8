//! UseCase: 参加リクエスト
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 空のルームならホストとして即入室、そうでなければホストの判断待ち
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者はホストになる
//! - 正常系：2 人目以降は待機し、ホストにリクエストが届く
//! - エッジケース：同じルームへの再リクエスト（冪等）
//! - 異常系：別のルームに参加中の接続からのリクエスト

use std::sync::Arc;

use crate::domain::{
    ConnectionId, DisplayName, JoinOutcome, MessagePusher, Notification, RoomKey,
    SessionRepository,
};

use super::{
    error::UseCaseError,
    notify::{deny, push_or_log},
};

/// 参加リクエストのユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
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
        requester: ConnectionId,
        room: RoomKey,
        display_name: DisplayName,
    ) -> Result<JoinOutcome, UseCaseError> {
        let outcome = match self
            .repository
            .request_join(room, &requester, display_name)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                deny(self.message_pusher.as_ref(), &requester, "join-request", &e).await;
                return Err(e.into());
            }
        };

        match &outcome {
            JoinOutcome::Founded { room, host } => {
                tracing::info!("'{}' joined room '{}' as host", requester, room);
                push_or_log(
                    self.message_pusher.as_ref(),
                    &requester,
                    Notification::RoomJoined {
                        room: room.clone(),
                        is_host: true,
                        display_name: host.display_name.clone(),
                    },
                )
                .await;
            }
            JoinOutcome::AlreadyMember {
                room,
                participant,
                is_host,
            } => {
                push_or_log(
                    self.message_pusher.as_ref(),
                    &requester,
                    Notification::RoomJoined {
                        room: room.clone(),
                        is_host: *is_host,
                        display_name: participant.display_name.clone(),
                    },
                )
                .await;
            }
            JoinOutcome::Queued {
                room,
                host,
                entry,
                newly_queued,
            } => {
                push_or_log(
                    self.message_pusher.as_ref(),
                    &requester,
                    Notification::WaitForHost { room: room.clone() },
                )
                .await;
                if *newly_queued {
                    tracing::info!("'{}' is waiting for the host of room '{}'", requester, room);
                    push_or_log(
                        self.message_pusher.as_ref(),
                        host,
                        Notification::UserRequestedJoin {
                            room: room.clone(),
                            requester: entry.clone().into(),
                        },
                    )
                    .await;
                }
            }
        }

        Ok(outcome)
    }
}
