//! Tamariba room server library.
//!
//! Realtime room coordinator: clients join named rooms over a persistent
//! WebSocket, broadcast lightweight events (emoji posts, reactions and
//! turn-based mini-game moves) to everyone present, and receive a bounded,
//! viewer-projected replay of recent history on join. All state is
//! in-memory and lost on restart.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
