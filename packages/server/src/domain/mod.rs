//! Domain layer: entities, value objects, game state machines and the
//! traits implemented by the infrastructure layer.

mod broadcast;
mod entity;
mod error;
mod game;
mod pusher;
mod registry;
mod value_object;

pub use broadcast::RoomBroadcaster;
pub use entity::{
    EmojiMessage, MESSAGE_HISTORY_LIMIT, Member, MessageProjection, ReactionChange, ReactionEntry,
    Room,
};
pub use error::{DisplayNameError, MessagePushError, RoomError, RoomIdError};
pub use game::{Game, GameAction, GameKind, GamePayload, Outcome, PollChoice, PollVotes};
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::RoomRegistry;
pub use value_object::{
    ClientIdentity, ConnectionId, DisplayName, MAX_DISPLAY_NAME_CHARS, MessageId, RoomId,
    Timestamp,
};
