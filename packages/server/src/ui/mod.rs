//! UI layer: axum router, WebSocket endpoint and HTTP API.

mod handler;
mod identity;
mod server;
mod signal;
pub mod state;

pub use server::Server;
