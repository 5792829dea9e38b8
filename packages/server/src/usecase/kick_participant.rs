//! UseCase: メンバーの退出（キック）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - KickParticipantUseCase::execute() メソッド
//! - 対象への `kicked`、残りのメンバーへの `user-left`
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストがメンバーを退出させる
//! - 正常系：画面共有中のメンバーを退出させると共有も止まる
//! - 異常系：ホスト以外によるキック、自分自身のキック

use std::sync::Arc;

use crate::domain::{ConnectionId, Departure, MessagePusher, Notification, SessionRepository};

use super::{
    departure::announce_departure,
    error::UseCaseError,
    notify::{deny, push_or_log},
};

/// キックのユースケース
pub struct KickParticipantUseCase {
    repository: Arc<dyn SessionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl KickParticipantUseCase {
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
        acting: ConnectionId,
        target: ConnectionId,
    ) -> Result<Departure, UseCaseError> {
        let departure = match self.repository.kick(&acting, &target).await {
            Ok(departure) => departure,
            Err(e) => {
                deny(self.message_pusher.as_ref(), &acting, "kick-user", &e).await;
                return Err(e.into());
            }
        };

        push_or_log(
            self.message_pusher.as_ref(),
            &target,
            Notification::Kicked {
                room: departure.room.clone(),
            },
        )
        .await;
        announce_departure(self.message_pusher.as_ref(), departure.clone()).await;

        Ok(departure)
    }
}
