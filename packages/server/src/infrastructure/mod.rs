//! Infrastructure layer: in-memory room registry, WebSocket message
//! pusher, fan-out broadcaster and wire DTOs.

pub mod broadcast;
pub mod dto;
pub mod message_pusher;
pub mod registry;
