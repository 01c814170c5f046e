//! WebSocket connection handlers.
//!
//! One task per connection: the inbound loop runs inline so the session
//! state stays local, while a spawned pusher loop drains the
//! per-connection channel into the socket. The core never sees the socket
//! itself — only the connection id, the resolved identity and the
//! `MessagePusher` channel registered here.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::HeaderMap,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::domain::{ClientIdentity, ConnectionId, DisplayName, RoomId};
use crate::infrastructure::dto::{
    conversion::parse_game_action,
    websocket::{InboundMessage, MessageDto, OutboundMessage},
};
use crate::usecase::{GameActionOutcome, JoinError, RoomEventError};

use super::super::identity::resolve_client_identity;
use super::super::state::AppState;

/// Per-connection session state, owned by the receive loop. A connection
/// joins at most one room and never switches without reconnecting.
struct Session {
    room: Option<RoomId>,
    name: Option<DisplayName>,
}

fn room_context(session: &Session) -> Option<(&RoomId, &DisplayName)> {
    match (&session.room, &session.name) {
        (Some(room_id), Some(name)) => Some((room_id, name)),
        _ => None,
    }
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let identity = resolve_client_identity(&headers, remote_addr);
    let connection_id = ConnectionId::generate();
    tracing::info!(
        "New connection '{}' from {}",
        connection_id.as_str(),
        remote_addr
    );

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, identity))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This function handles the outbound message flow: events addressed to
/// this connection (via its `MessagePusher` channel) are written to the
/// WebSocket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this client
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    identity: ClientIdentity,
) {
    let (sender, mut receiver) = socket.split();

    // Register the outbound channel before any event can address us
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .pusher
        .register_client(connection_id.clone(), tx)
        .await;
    let send_task = pusher_loop(rx, sender);

    let mut session = Session {
        room: None,
        name: None,
    };

    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                handle_text(&state, &connection_id, &identity, &mut session, &text).await;
            }
            Message::Ping(_) => {
                tracing::debug!("Received ping");
                // Ping/pong is handled automatically by the WebSocket protocol
            }
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id.as_str());
                break;
            }
            _ => {}
        }
    }

    // Close is the only teardown signal: drop membership first so the
    // roster update reaches the remaining members, then the channel.
    if let Some(room_id) = session.room.take() {
        if let Some(users) = state
            .leave_room_usecase
            .execute(&connection_id, &room_id)
            .await
        {
            broadcast_event(&state, &room_id, &OutboundMessage::Users { users }).await;
        }
    }
    state.pusher.unregister_client(&connection_id).await;
    send_task.abort();

    tracing::info!("Connection '{}' disconnected", connection_id.as_str());
}

async fn handle_text(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    identity: &ClientIdentity,
    session: &mut Session,
    text: &str,
) {
    let inbound = match serde_json::from_str::<InboundMessage>(text) {
        Ok(inbound) => inbound,
        Err(e) => {
            tracing::warn!("Failed to parse message as JSON: {}", e);
            send_error(state, connection_id, "Invalid message format").await;
            return;
        }
    };

    match inbound {
        InboundMessage::Join { room_id, name } => {
            if session.room.is_some() {
                send_error(state, connection_id, &JoinError::AlreadyJoined.to_string()).await;
                return;
            }
            match state
                .join_room_usecase
                .execute(connection_id.clone(), identity.clone(), &room_id, &name)
                .await
            {
                Ok(outcome) => {
                    session.room = Some(outcome.room_id.clone());
                    session.name = Some(outcome.name);
                    // roster to everyone (including the joiner), then the
                    // replay to the joiner only — and only when non-empty
                    broadcast_event(
                        state,
                        &outcome.room_id,
                        &OutboundMessage::Users {
                            users: outcome.roster,
                        },
                    )
                    .await;
                    if !outcome.history.is_empty() {
                        let messages = outcome.history.into_iter().map(MessageDto::from).collect();
                        push_event(
                            state,
                            connection_id,
                            &OutboundMessage::Messages { messages },
                        )
                        .await;
                    }
                }
                Err(e) => send_error(state, connection_id, &e.to_string()).await,
            }
        }
        InboundMessage::Emoji { emoji } => {
            let Some((room_id, name)) = room_context(session) else {
                send_error(state, connection_id, &RoomEventError::NotInRoom.to_string()).await;
                return;
            };
            match state.post_emoji_usecase.execute(room_id, name, emoji).await {
                Ok(message) => {
                    broadcast_event(
                        state,
                        room_id,
                        &OutboundMessage::Emoji {
                            message: MessageDto::fresh(message),
                        },
                    )
                    .await;
                }
                Err(e) => send_error(state, connection_id, &e.to_string()).await,
            }
        }
        InboundMessage::Reaction {
            message_id,
            reaction,
        } => {
            let Some((room_id, name)) = room_context(session) else {
                send_error(state, connection_id, &RoomEventError::NotInRoom.to_string()).await;
                return;
            };
            match state
                .react_usecase
                .execute(room_id, &message_id, &reaction, name, identity)
                .await
            {
                Ok(changes) => {
                    // removal (if any) goes out before the addition
                    for change in changes {
                        broadcast_event(
                            state,
                            room_id,
                            &OutboundMessage::Reaction {
                                message_id: change.message_id.into_string(),
                                reaction: change.label,
                                name: change.name,
                                status: change.active,
                            },
                        )
                        .await;
                    }
                }
                Err(e) => send_error(state, connection_id, &e.to_string()).await,
            }
        }
        InboundMessage::StartGame { game_type, .. } => {
            let Some((room_id, _)) = room_context(session) else {
                send_error(state, connection_id, &RoomEventError::NotInRoom.to_string()).await;
                return;
            };
            match state.start_game_usecase.execute(room_id, game_type).await {
                Ok(Some(started)) => {
                    broadcast_event(
                        state,
                        room_id,
                        &OutboundMessage::GameStart {
                            game_type: started.kind,
                            initial_data: started.initial_data,
                            first_player: started.first_player,
                        },
                    )
                    .await;
                }
                // empty room: silent no-op
                Ok(None) => {}
                Err(e) => send_error(state, connection_id, &e.to_string()).await,
            }
        }
        InboundMessage::GameAction { action, data } => {
            let Some((room_id, name)) = room_context(session) else {
                send_error(state, connection_id, &RoomEventError::NotInRoom.to_string()).await;
                return;
            };
            let Some(parsed) = parse_game_action(&action, &data) else {
                // unknown action or malformed data: rejected, no broadcast
                tracing::debug!("Ignoring unrecognized game action '{}'", action);
                return;
            };
            match state
                .game_action_usecase
                .execute(room_id, &parsed, name)
                .await
            {
                Ok(GameActionOutcome::Continued {
                    game_data,
                    next_player,
                }) => {
                    broadcast_event(
                        state,
                        room_id,
                        &OutboundMessage::GameUpdate {
                            game_data,
                            next_player,
                        },
                    )
                    .await;
                }
                Ok(GameActionOutcome::Ended { scores }) => {
                    broadcast_event(state, room_id, &OutboundMessage::GameEnd { scores }).await;
                }
                Ok(GameActionOutcome::Rejected) => {}
                Err(e) => send_error(state, connection_id, &e.to_string()).await,
            }
        }
    }
}

/// Serialize an event once and fan it out to the room.
async fn broadcast_event(state: &Arc<AppState>, room_id: &RoomId, event: &OutboundMessage) {
    match serde_json::to_string(event) {
        Ok(json) => state.broadcaster.broadcast(room_id, &json).await,
        Err(e) => tracing::error!("Failed to serialize outbound event: {}", e),
    }
}

/// Send an event to this connection only.
async fn push_event(state: &Arc<AppState>, connection_id: &ConnectionId, event: &OutboundMessage) {
    match serde_json::to_string(event) {
        Ok(json) => {
            if let Err(e) = state.pusher.push_to(connection_id, &json).await {
                tracing::warn!(
                    "Failed to push event to connection '{}': {}",
                    connection_id.as_str(),
                    e
                );
            }
        }
        Err(e) => tracing::error!("Failed to serialize outbound event: {}", e),
    }
}

async fn send_error(state: &Arc<AppState>, connection_id: &ConnectionId, message: &str) {
    push_event(
        state,
        connection_id,
        &OutboundMessage::Error {
            message: message.to_string(),
        },
    )
    .await;
}
