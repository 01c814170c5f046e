//! Conversion logic between DTOs and domain entities.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{EmojiMessage, GameAction, MessageProjection, PollChoice};
use crate::infrastructure::dto::websocket::MessageDto;

impl MessageDto {
    /// A freshly posted message for the `emoji` broadcast. The reaction map
    /// is empty at this point, so no viewer projection is needed.
    pub fn fresh(message: EmojiMessage) -> Self {
        Self {
            id: message.id.into_string(),
            name: message.author.into_string(),
            emoji: message.emoji,
            timestamp: message.posted_at.value(),
            reactions: std::collections::HashMap::new(),
        }
    }
}

impl From<MessageProjection> for MessageDto {
    fn from(projection: MessageProjection) -> Self {
        Self {
            id: projection.id.into_string(),
            name: projection.author.into_string(),
            emoji: projection.emoji,
            timestamp: projection.posted_at.value(),
            reactions: projection.reactions,
        }
    }
}

#[derive(Deserialize)]
struct SubmitPollData {
    question: String,
}

#[derive(Deserialize)]
struct VoteData {
    vote: PollChoice,
}

#[derive(Deserialize)]
struct SubmitWordData {
    word: String,
}

#[derive(Deserialize)]
struct AddEmojiData {
    emoji: String,
}

/// Parse a `gameAction` payload into a typed action.
///
/// Returns `None` for an unknown action name or malformed data; the caller
/// treats that as a rejected action (no state change, no broadcast).
pub fn parse_game_action(action: &str, data: &Value) -> Option<GameAction> {
    match action {
        "submitPoll" => serde_json::from_value::<SubmitPollData>(data.clone())
            .ok()
            .map(|d| GameAction::SubmitPoll {
                question: d.question,
            }),
        "vote" => serde_json::from_value::<VoteData>(data.clone())
            .ok()
            .map(|d| GameAction::Vote { choice: d.vote }),
        "submitWord" => serde_json::from_value::<SubmitWordData>(data.clone())
            .ok()
            .map(|d| GameAction::SubmitWord { word: d.word }),
        "addEmoji" => serde_json::from_value::<AddEmojiData>(data.clone())
            .ok()
            .map(|d| GameAction::AddEmoji { emoji: d.emoji }),
        _ => None,
    }
}
