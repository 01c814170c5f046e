//! Client identity resolution.

use std::net::SocketAddr;

use axum::http::HeaderMap;

use crate::domain::ClientIdentity;

/// Derive the deduplication identity for a connection: the first
/// `X-Forwarded-For` entry when present (the server may sit behind a
/// proxy), otherwise the peer address's IP. Independent of the display
/// name the user supplies, and never exposed to other clients.
pub fn resolve_client_identity(headers: &HeaderMap, remote_addr: SocketAddr) -> ClientIdentity {
    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return ClientIdentity::new(first);
            }
        }
    }
    ClientIdentity::new(remote_addr.ip().to_string())
}
