//! UseCase layer: one struct per room operation, depending only on the
//! domain traits (dependency inversion).

mod error;
mod game_action;
mod join_room;
mod leave_room;
mod post_emoji;
mod react_message;
mod start_game;
mod sweep_rooms;

pub use error::{JoinError, RoomEventError};
pub use game_action::{GameActionOutcome, GameActionUseCase};
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use post_emoji::PostEmojiUseCase;
pub use react_message::ReactToMessageUseCase;
pub use start_game::{GameStarted, StartGameUseCase};
pub use sweep_rooms::{IDLE_ROOM_TIMEOUT, SWEEP_INTERVAL, SweepIdleRoomsUseCase};
