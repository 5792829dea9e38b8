//! UseCase: 入室拒否

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, Rejection, RoomKey, SessionRepository,
};

use super::{
    error::UseCaseError,
    notify::{deny, push_or_log},
};

/// 入室拒否のユースケース
pub struct RejectParticipantUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RejectParticipantUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// `acting` が `room` の待機者 `requester` を拒否する
    pub async fn execute(
        &self,
        acting: ConnectionId,
        room: RoomKey,
        requester: ConnectionId,
    ) -> Result<Rejection, UseCaseError> {
        let rejection = match self.repository.reject(&room, &requester, &acting).await {
            Ok(rejection) => rejection,
            Err(e) => {
                deny(self.message_pusher.as_ref(), &acting, "reject-user", &e).await;
                return Err(e.into());
            }
        };
        tracing::info!("'{}' rejected '{}' from room '{}'", acting, requester, room);

        push_or_log(
            self.message_pusher.as_ref(),
            &rejection.requester,
            Notification::JoinRejected {
                room: rejection.room.clone(),
            },
        )
        .await;

        Ok(rejection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::SessionError, usecase::test_support::*};

    #[tokio::test]
    async fn test_reject_notifies_requester() {
        // テスト項目: 拒否された本人にだけ join-rejected が届き、待機列から消える
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = RecordingPusher::new();
        let usecase = RejectParticipantUseCase::new(repository.clone(), pusher.clone());
        setup_room(&repository, "daily", "alice", &[]).await;
        repository.connect(id("bob")).await;
        repository
            .request_join(key("daily"), &id("bob"), name("bob"))
            .await
            .unwrap();

        // when (操作):
        usecase
            .execute(id("alice"), key("daily"), id("bob"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(
            pusher.take().await,
            vec![(
                id("bob"),
                Notification::JoinRejected { room: key("daily") }
            )]
        );
        let detail = repository.get_room_detail(&key("daily")).await.unwrap();
        assert!(detail.room.waiting.is_empty());
        assert_eq!(detail.room.members, vec![id("alice")]);
    }

    #[tokio::test]
    async fn test_reject_unknown_request() {
        // テスト項目: 待機していない相手の拒否は RequestNotFound で、ホストに action-denied が届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = RecordingPusher::new();
        let usecase = RejectParticipantUseCase::new(repository.clone(), pusher.clone());
        setup_room(&repository, "daily", "alice", &[]).await;

        // when (操作):
        let result = usecase.execute(id("alice"), key("daily"), id("ghost")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(UseCaseError::Session(SessionError::RequestNotFound(
                "ghost".to_string()
            )))
        );
        let sent = pusher.sent_to(&id("alice")).await;
        assert!(matches!(
            sent.as_slice(),
            [Notification::ActionDenied { action, .. }] if action == "reject-user"
        ));
    }
}
