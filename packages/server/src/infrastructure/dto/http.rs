//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub key: String,
    pub host: Option<String>,
    pub members: Vec<String>,
    pub waiting_count: usize,
    pub screen_sharer: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub identity: String,
    pub username: String,
    pub joined_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingDetailDto {
    pub identity: String,
    pub username: String,
    pub requested_at: String,
}

/// Body of `GET /api/rooms/{*room_key}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub key: String,
    pub host: Option<String>,
    pub members: Vec<MemberDetailDto>,
    pub waiting: Vec<WaitingDetailDto>,
    pub screen_sharer: Option<String>,
    pub message_count: usize,
    pub created_at: String,
}
