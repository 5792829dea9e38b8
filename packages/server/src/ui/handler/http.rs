//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{Room, RoomKey},
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::state::AppState,
};

/// Debug endpoint to get every room's full state (for testing purposes)
pub async fn debug_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<Room>> {
    Json(state.get_rooms_usecase.execute().await)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.into_iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by key
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_key): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let Ok(room_key) = RoomKey::new(room_key) else {
        return Err(StatusCode::NOT_FOUND);
    };

    match state.get_room_detail_usecase.execute(room_key).await {
        Ok(detail) => Ok(Json(detail.into())),
        Err(e) if e.is_not_found() => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get room detail: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
