//! Server state shared by handlers.

use std::sync::Arc;

use crate::usecase::{GetRoomDetailUseCase, GetRoomsUseCase};

use super::dispatcher::EventSender;

/// Shared application state
pub struct AppState {
    /// WebSocket イベントの投入口（直列ディスパッチャーへ）
    pub events: EventSender,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
