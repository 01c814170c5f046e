//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use tamariba_shared::time::timestamp_to_rfc3339;

use crate::domain::RoomId;
use crate::infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto};

use super::super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let mut summaries = Vec::new();
    for room_id in state.registry.room_ids().await {
        // a room may be swept between listing and acquisition
        if let Some(room) = state.registry.acquire(&room_id).await {
            summaries.push(RoomSummaryDto {
                id: room.id().as_str().to_string(),
                users: room.roster(),
                created_at: timestamp_to_rfc3339(room.created_at().value()),
            });
        }
    }
    Json(summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(&room_id).map_err(|_| StatusCode::BAD_REQUEST)?;
    let room = state
        .registry
        .acquire(&room_id)
        .await
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(RoomDetailDto {
        id: room.id().as_str().to_string(),
        users: room.roster(),
        message_count: room.message_count(),
        created_at: timestamp_to_rfc3339(room.created_at().value()),
        active_game: room.game().map(|game| game.kind()),
    }))
}
