//! Server execution logic.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::domain::{MessagePusher, RoomBroadcaster, RoomRegistry};
use crate::usecase::{
    GameActionUseCase, JoinRoomUseCase, LeaveRoomUseCase, PostEmojiUseCase, ReactToMessageUseCase,
    SWEEP_INTERVAL, StartGameUseCase, SweepIdleRoomsUseCase,
};

use super::{
    handler::{
        http::{get_room_detail, get_rooms, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room server over WebSocket
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     registry,
///     pusher,
///     broadcaster,
///     join_room_usecase,
///     leave_room_usecase,
///     post_emoji_usecase,
///     react_usecase,
///     start_game_usecase,
///     game_action_usecase,
///     sweep_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
    /// RoomBroadcaster（ルーム配信の抽象化）
    broadcaster: Arc<dyn RoomBroadcaster>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// PostEmojiUseCase（絵文字投稿のユースケース）
    post_emoji_usecase: Arc<PostEmojiUseCase>,
    /// ReactToMessageUseCase（リアクションのユースケース）
    react_usecase: Arc<ReactToMessageUseCase>,
    /// StartGameUseCase（ゲーム開始のユースケース）
    start_game_usecase: Arc<StartGameUseCase>,
    /// GameActionUseCase（ゲームアクションのユースケース）
    game_action_usecase: Arc<GameActionUseCase>,
    /// SweepIdleRoomsUseCase（アイドルルーム掃除のユースケース）
    sweep_usecase: Arc<SweepIdleRoomsUseCase>,
}

impl Server {
    /// Create a new Server instance
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn MessagePusher>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        post_emoji_usecase: Arc<PostEmojiUseCase>,
        react_usecase: Arc<ReactToMessageUseCase>,
        start_game_usecase: Arc<StartGameUseCase>,
        game_action_usecase: Arc<GameActionUseCase>,
        sweep_usecase: Arc<SweepIdleRoomsUseCase>,
    ) -> Self {
        Self {
            registry,
            pusher,
            broadcaster,
            join_room_usecase,
            leave_room_usecase,
            post_emoji_usecase,
            react_usecase,
            start_game_usecase,
            game_action_usecase,
            sweep_usecase,
        }
    }

    /// Run the room server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            registry: self.registry,
            pusher: self.pusher,
            broadcaster: self.broadcaster,
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            post_emoji_usecase: self.post_emoji_usecase,
            react_usecase: self.react_usecase,
            start_game_usecase: self.start_game_usecase,
            game_action_usecase: self.game_action_usecase,
        });

        // Periodic idle-room sweep, independent of live traffic
        let sweep_usecase = self.sweep_usecase;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SWEEP_INTERVAL);
            // the first tick completes immediately; skip it
            interval.tick().await;
            loop {
                interval.tick().await;
                sweep_usecase.execute().await;
            }
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_id}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Room server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // ConnectInfo is required for client identity resolution
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
