//! Server state and connection management.

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomBroadcaster, RoomRegistry};
use crate::usecase::{
    GameActionUseCase, JoinRoomUseCase, LeaveRoomUseCase, PostEmojiUseCase, ReactToMessageUseCase,
    StartGameUseCase,
};

/// Shared application state
pub struct AppState {
    /// RoomRegistry（ルーム登録簿の抽象化、HTTP API から参照）
    pub registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pub pusher: Arc<dyn MessagePusher>,
    /// RoomBroadcaster（ルーム配信の抽象化）
    pub broadcaster: Arc<dyn RoomBroadcaster>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// PostEmojiUseCase（絵文字投稿のユースケース）
    pub post_emoji_usecase: Arc<PostEmojiUseCase>,
    /// ReactToMessageUseCase（リアクションのユースケース）
    pub react_usecase: Arc<ReactToMessageUseCase>,
    /// StartGameUseCase（ゲーム開始のユースケース）
    pub start_game_usecase: Arc<StartGameUseCase>,
    /// GameActionUseCase（ゲームアクションのユースケース）
    pub game_action_usecase: Arc<GameActionUseCase>,
}
