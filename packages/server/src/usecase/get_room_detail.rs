//! UseCase: ルーム詳細の取得

use std::sync::Arc;

use crate::domain::{RoomDetail, RoomKey, SessionError, SessionRepository};

use super::error::UseCaseError;

pub struct GetRoomDetailUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, room: RoomKey) -> Result<RoomDetail, UseCaseError> {
        self.repository
            .get_room_detail(&room)
            .await
            .ok_or_else(|| SessionError::RoomNotFound(room.into_string()).into())
    }
}
