//! Tamariba room server with rooms, reactions and mini-games.
//!
//! Clients join named rooms over WebSocket and exchange emoji posts,
//! reactions and mini-game moves.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tamariba-server
//! cargo run --bin tamariba-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use tamariba_shared::{logger::setup_logger, time::SystemClock};

use tamariba_server::{
    infrastructure::{
        broadcast::FanoutBroadcaster, message_pusher::WebSocketMessagePusher,
        registry::InMemoryRoomRegistry,
    },
    ui::Server,
    usecase::{
        GameActionUseCase, JoinRoomUseCase, LeaveRoomUseCase, PostEmojiUseCase,
        ReactToMessageUseCase, StartGameUseCase, SweepIdleRoomsUseCase,
    },
};

#[derive(Parser, Debug)]
#[command(name = "tamariba-server")]
#[command(about = "Realtime room server with reactions and mini-games", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Clock
    // 2. Registry
    // 3. MessagePusher
    // 4. Broadcaster
    // 5. UseCases
    // 6. Server

    // 1. Create Clock (system time)
    let clock = Arc::new(SystemClock);

    // 2. Create Registry (in-memory room store)
    let registry = Arc::new(InMemoryRoomRegistry::new());

    // 3. Create MessagePusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketMessagePusher::new());

    // 4. Create Broadcaster (fan-out with dead-connection eviction)
    let broadcaster = Arc::new(FanoutBroadcaster::new(
        registry.clone(),
        pusher.clone(),
        clock.clone(),
    ));

    // 5. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(registry.clone(), clock.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(registry.clone(), clock.clone()));
    let post_emoji_usecase = Arc::new(PostEmojiUseCase::new(registry.clone(), clock.clone()));
    let react_usecase = Arc::new(ReactToMessageUseCase::new(registry.clone(), clock.clone()));
    let start_game_usecase = Arc::new(StartGameUseCase::new(registry.clone(), clock.clone()));
    let game_action_usecase = Arc::new(GameActionUseCase::new(registry.clone(), clock.clone()));
    let sweep_usecase = Arc::new(SweepIdleRoomsUseCase::new(registry.clone(), clock.clone()));

    // 6. Create and run the server
    let server = Server::new(
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
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
