//! WebSocket message DTOs.
//!
//! Inbound and outbound events are JSON objects discriminated by a `type`
//! field, with camelCase member names on the wire.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{GameKind, GamePayload};

/// Inbound client events.
///
/// An unparseable payload is answered with `error{"Invalid message format"}`;
/// room-scoped kinds arriving before a successful join are answered with
/// `error{"Not in a room"}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    #[serde(rename_all = "camelCase")]
    Join { room_id: String, name: String },
    Emoji { emoji: String },
    #[serde(rename_all = "camelCase")]
    Reaction { message_id: String, reaction: String },
    #[serde(rename_all = "camelCase")]
    StartGame {
        game_type: GameKind,
        /// Accepted for wire compatibility; the roster snapshot decides who
        /// plays, so the field is not read.
        initiator: Option<String>,
    },
    GameAction {
        action: String,
        #[serde(default)]
        data: Value,
    },
}

/// A message as shipped to clients: fresh (`emoji` broadcast, empty
/// reactions) or replayed (`messages` event, viewer-projected booleans).
#[derive(Debug, Clone, Serialize)]
pub struct MessageDto {
    pub id: String,
    pub name: String,
    pub emoji: String,
    pub timestamp: i64,
    pub reactions: HashMap<String, HashMap<String, bool>>,
}

/// Outbound server events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum OutboundMessage {
    Error {
        message: String,
    },
    Users {
        users: Vec<String>,
    },
    Messages {
        messages: Vec<MessageDto>,
    },
    Emoji {
        #[serde(flatten)]
        message: MessageDto,
    },
    #[serde(rename_all = "camelCase")]
    Reaction {
        message_id: String,
        reaction: String,
        name: String,
        status: bool,
    },
    #[serde(rename_all = "camelCase")]
    GameStart {
        game_type: GameKind,
        initial_data: GamePayload,
        first_player: String,
    },
    #[serde(rename_all = "camelCase")]
    GameUpdate {
        game_data: GamePayload,
        next_player: String,
    },
    GameEnd {
        scores: HashMap<String, u32>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_message() {
        // テスト項目: join イベントがパースされる
        // given (前提条件):
        let raw = r#"{"type":"join","roomId":"lounge","name":"alice"}"#;

        // when (操作):
        let parsed: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        match parsed {
            InboundMessage::Join { room_id, name } => {
                assert_eq!(room_id, "lounge");
                assert_eq!(name, "alice");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_parse_reaction_message() {
        // テスト項目: reaction イベントがパースされる
        // given (前提条件):
        let raw = r#"{"type":"reaction","messageId":"abc123","reaction":"❤️"}"#;

        // when (操作):
        let parsed: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        match parsed {
            InboundMessage::Reaction { message_id, reaction } => {
                assert_eq!(message_id, "abc123");
                assert_eq!(reaction, "❤️");
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_parse_start_game_message() {
        // テスト項目: startGame イベントの gameType が表示名タグで
        //             パースされる
        // given (前提条件):
        let raw = r#"{"type":"startGame","gameType":"Word Chain","initiator":"alice"}"#;

        // when (操作):
        let parsed: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        match parsed {
            InboundMessage::StartGame { game_type, .. } => {
                assert_eq!(game_type, GameKind::WordChain);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_parse_game_action_without_data_defaults_to_null() {
        // テスト項目: data フィールドのない gameAction もパースされる
        // given (前提条件):
        let raw = r#"{"type":"gameAction","action":"submitWord"}"#;

        // when (操作):
        let parsed: InboundMessage = serde_json::from_str(raw).unwrap();

        // then (期待する結果):
        match parsed {
            InboundMessage::GameAction { action, data } => {
                assert_eq!(action, "submitWord");
                assert!(data.is_null());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        // テスト項目: 未知の type はパースエラーになる
        // given (前提条件):
        let raw = r#"{"type":"teleport","destination":"mars"}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_game_type() {
        // テスト項目: 未知の gameType はパースエラーになる
        // given (前提条件):
        let raw = r#"{"type":"startGame","gameType":"Chess","initiator":"alice"}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundMessage>(raw);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_error_message() {
        // テスト項目: error イベントが type タグ付きで直列化される
        // given (前提条件):
        let message = OutboundMessage::Error {
            message: "Not in a room".to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type":"error","message":"Not in a room"}));
    }

    #[test]
    fn test_serialize_users_message() {
        // テスト項目: users イベントの形
        // given (前提条件):
        let message = OutboundMessage::Users {
            users: vec!["alice".to_string(), "bob".to_string()],
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type":"users","users":["alice","bob"]}));
    }

    #[test]
    fn test_serialize_emoji_message_flattens_fields() {
        // テスト項目: emoji イベントはメッセージのフィールドを
        //             トップレベルに展開する
        // given (前提条件):
        let message = OutboundMessage::Emoji {
            message: MessageDto {
                id: "abc123".to_string(),
                name: "alice".to_string(),
                emoji: "😀".to_string(),
                timestamp: 1000,
                reactions: HashMap::new(),
            },
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "emoji",
                "id": "abc123",
                "name": "alice",
                "emoji": "😀",
                "timestamp": 1000,
                "reactions": {}
            })
        );
    }

    #[test]
    fn test_serialize_reaction_message_uses_camel_case() {
        // テスト項目: reaction イベントのフィールド名が camelCase になる
        // given (前提条件):
        let message = OutboundMessage::Reaction {
            message_id: "abc123".to_string(),
            reaction: "❤️".to_string(),
            name: "bob".to_string(),
            status: true,
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "reaction",
                "messageId": "abc123",
                "reaction": "❤️",
                "name": "bob",
                "status": true
            })
        );
    }

    #[test]
    fn test_serialize_game_start_with_payload() {
        // テスト項目: gameStart イベントにゲーム種別の表示名タグと
        //             初期ペイロードが載る
        // given (前提条件):
        let game = crate::domain::Game::start(GameKind::EmojiStory, vec!["alice".to_string()])
            .unwrap();
        let message = OutboundMessage::GameStart {
            game_type: game.kind(),
            initial_data: game.payload().clone(),
            first_player: game.current_player().to_string(),
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "gameStart",
                "gameType": "Emoji Story",
                "initialData": {"story": [], "currentRound": 1},
                "firstPlayer": "alice"
            })
        );
    }

    #[test]
    fn test_serialize_word_chain_payload_sets_become_arrays() {
        // テスト項目: Word Chain ペイロードの使用済み単語セットが
        //             配列として直列化される
        // given (前提条件):
        let mut game =
            crate::domain::Game::start(GameKind::WordChain, vec!["alice".to_string()]).unwrap();
        game.apply_action(
            &crate::domain::GameAction::SubmitWord {
                word: "test".to_string(),
            },
            "alice",
        );

        // when (操作):
        let value = serde_json::to_value(game.payload()).unwrap();

        // then (期待する結果):
        assert_eq!(value["words"], json!(["test"]));
        assert_eq!(value["lastLetter"], json!("t"));
        assert_eq!(value["usedWords"], json!(["test"]));
    }
}
