//! UseCase: 画面共有の開始・停止
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ScreenShareUseCase::start() / stop()
//! - ルームごとに共有者は 1 人だけ
//!
//! ### どのような状況を想定しているか
//! - 正常系：共有開始でルーム全員（本人含む）に screen-share-started
//! - 異常系：他のメンバーが共有中なら本人に screen-share-denied
//! - エッジケース：共有していない人の停止は無視

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, SessionError, SessionRepository, ShareStarted,
    ShareStopped,
};

use super::{
    error::UseCaseError,
    notify::{broadcast_or_log, deny, push_or_log},
};

/// 画面共有のユースケース
pub struct ScreenShareUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ScreenShareUseCase {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 画面共有を開始する（同じ人からの再リクエストも許可）
    pub async fn start(&self, requester: ConnectionId) -> Result<ShareStarted, UseCaseError> {
        let pusher = self.message_pusher.as_ref();
        match self.repository.request_share(&requester).await {
            Ok(started) => {
                tracing::info!(
                    "'{}' started screen sharing in room '{}'",
                    requester,
                    started.room
                );
                broadcast_or_log(
                    pusher,
                    started.audience.clone(),
                    Notification::ScreenShareStarted {
                        holder: started.holder.clone(),
                    },
                )
                .await;
                Ok(started)
            }
            Err(SessionError::AlreadySharing { holder }) => {
                tracing::info!("Screen share denied for '{}': '{}' holds it", requester, holder);
                push_or_log(
                    pusher,
                    &requester,
                    Notification::ScreenShareDenied {
                        holder: holder.clone(),
                    },
                )
                .await;
                Err(SessionError::AlreadySharing { holder }.into())
            }
            Err(e) => {
                deny(pusher, &requester, "request-screen-share", &e).await;
                Err(e.into())
            }
        }
    }

    /// 画面共有を停止する。共有者以外からの停止は `Ok(None)`
    pub async fn stop(&self, requester: ConnectionId) -> Result<Option<ShareStopped>, UseCaseError> {
        let stopped = self.repository.stop_share(&requester).await?;
        match &stopped {
            Some(stopped) => {
                tracing::info!(
                    "'{}' stopped screen sharing in room '{}'",
                    requester,
                    stopped.room
                );
                broadcast_or_log(
                    self.message_pusher.as_ref(),
                    stopped.audience.clone(),
                    Notification::ScreenShareStopped {
                        holder: stopped.holder.clone(),
                    },
                )
                .await;
            }
            None => {
                tracing::debug!("Ignored stop-screen-share from non-holder '{}'", requester);
            }
        }
        Ok(stopped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::*;

    #[tokio::test]
    async fn test_start_share_broadcasts_to_whole_room() {
        // テスト項目: 共有開始はリクエストした本人を含むルーム全員に届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = RecordingPusher::new();
        let usecase = ScreenShareUseCase::new(repository.clone(), pusher.clone());
        setup_room(&repository, "daily", "alice", &["bob"]).await;

        // when (操作):
        usecase.start(id("bob")).await.unwrap();

        // then (期待する結果):
        let started = Notification::ScreenShareStarted { holder: id("bob") };
        assert_eq!(
            pusher.take().await,
            vec![(id("alice"), started.clone()), (id("bob"), started)]
        );
    }

    #[tokio::test]
    async fn test_second_sharer_is_denied() {
        // テスト項目: 他のメンバーが共有中なら screen-share-denied（共有者付き）が本人にだけ届く
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = RecordingPusher::new();
        let usecase = ScreenShareUseCase::new(repository.clone(), pusher.clone());
        setup_room(&repository, "daily", "alice", &["bob"]).await;
        usecase.start(id("alice")).await.unwrap();
        pusher.take().await;

        // when (操作):
        let result = usecase.start(id("bob")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(UseCaseError::Session(SessionError::AlreadySharing {
                holder: id("alice")
            }))
        );
        assert_eq!(
            pusher.take().await,
            vec![(
                id("bob"),
                Notification::ScreenShareDenied { holder: id("alice") }
            )]
        );
    }

    #[tokio::test]
    async fn test_stop_by_non_holder_is_ignored() {
        // テスト項目: 共有者以外からの停止は無視され、通知も送られない
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = RecordingPusher::new();
        let usecase = ScreenShareUseCase::new(repository.clone(), pusher.clone());
        setup_room(&repository, "daily", "alice", &["bob"]).await;
        usecase.start(id("alice")).await.unwrap();
        pusher.take().await;

        // when (操作):
        let result = usecase.stop(id("bob")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(None));
        assert!(pusher.take().await.is_empty());
    }

    #[tokio::test]
    async fn test_stop_by_holder_releases_lock() {
        // テスト項目: 共有者が停止すると全員に通知され、他のメンバーが共有できるようになる
        // given (前提条件):
        let repository = create_test_repository();
        let pusher = RecordingPusher::new();
        let usecase = ScreenShareUseCase::new(repository.clone(), pusher.clone());
        setup_room(&repository, "daily", "alice", &["bob"]).await;
        usecase.start(id("alice")).await.unwrap();
        pusher.take().await;

        // when (操作):
        usecase.stop(id("alice")).await.unwrap();

        // then (期待する結果):
        let stopped = Notification::ScreenShareStopped {
            holder: id("alice"),
        };
        assert_eq!(
            pusher.take().await,
            vec![(id("alice"), stopped.clone()), (id("bob"), stopped)]
        );
        assert!(usecase.start(id("bob")).await.is_ok());
    }
}
