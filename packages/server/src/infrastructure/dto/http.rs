//! HTTP API response DTOs.

use serde::Serialize;

use crate::domain::GameKind;

/// Room summary for `GET /api/rooms`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub users: Vec<String>,
    pub created_at: String,
}

/// Room detail for `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub users: Vec<String>,
    pub message_count: usize,
    pub created_at: String,
    pub active_game: Option<GameKind>,
}
