//! Mini-game state machines.
//!
//! A room hosts at most one active game. The kinds form a closed variant
//! set with a uniform [`Game::apply_action`] contract; adding a kind means
//! adding a variant here, not scattering branches across handlers.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Number of emojis that completes an Emoji Story.
const EMOJI_STORY_LENGTH: usize = 10;

/// The closed set of game kinds, tagged on the wire by their display names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameKind {
    #[serde(rename = "Quick Poll")]
    QuickPoll,
    #[serde(rename = "Word Chain")]
    WordChain,
    #[serde(rename = "Emoji Story")]
    EmojiStory,
    #[serde(rename = "Team Trivia")]
    TeamTrivia,
}

impl GameKind {
    /// Whether actions are restricted to the current-turn player.
    ///
    /// Quick Poll is intentionally open to everyone (anyone may submit a
    /// question or vote); Team Trivia has no transition rules yet.
    pub fn turn_gated(self) -> bool {
        matches!(self, GameKind::WordChain | GameKind::EmojiStory)
    }
}

/// Yes/no tallies for a Quick Poll question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PollVotes {
    pub yes: u32,
    pub no: u32,
}

/// A single poll ballot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollChoice {
    Yes,
    No,
}

/// Kind-specific game data, serialized as-is into gameStart/gameUpdate
/// events. Sets go over the wire as arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GamePayload {
    #[serde(rename_all = "camelCase")]
    QuickPoll {
        question: Option<String>,
        votes: PollVotes,
        voted: HashSet<String>,
    },
    #[serde(rename_all = "camelCase")]
    WordChain {
        words: Vec<String>,
        last_letter: Option<char>,
        used_words: HashSet<String>,
    },
    #[serde(rename_all = "camelCase")]
    EmojiStory {
        story: Vec<String>,
        current_round: u32,
    },
    #[serde(rename_all = "camelCase")]
    TeamTrivia {
        current_question: Option<String>,
        answers: HashMap<String, String>,
    },
}

/// A parsed game action from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameAction {
    SubmitPoll { question: String },
    Vote { choice: PollChoice },
    SubmitWord { word: String },
    AddEmoji { emoji: String },
}

/// Result of applying an action to the active game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State advanced; rotate the turn and broadcast the update.
    Continue,
    /// Terminal condition reached; broadcast final scores and clear the game.
    End,
    /// Action not accepted; no state change, no broadcast.
    Rejected,
}

/// A single active mini-game: roster snapshot, turn pointer, scores and
/// kind-specific payload.
///
/// `players` is snapshotted at start and never shrinks, so
/// `current_player_index` stays in `[0, players.len())` for the life of
/// the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    kind: GameKind,
    players: Vec<String>,
    current_player_index: usize,
    scores: HashMap<String, u32>,
    payload: GamePayload,
}

impl Game {
    /// Start a game over a roster snapshot. Returns `None` for an empty
    /// roster — starting a game in an empty room is a silent no-op.
    pub fn start(kind: GameKind, players: Vec<String>) -> Option<Self> {
        if players.is_empty() {
            return None;
        }
        let payload = match kind {
            GameKind::QuickPoll => GamePayload::QuickPoll {
                question: None,
                votes: PollVotes::default(),
                voted: HashSet::new(),
            },
            GameKind::WordChain => GamePayload::WordChain {
                words: Vec::new(),
                last_letter: None,
                used_words: HashSet::new(),
            },
            GameKind::EmojiStory => GamePayload::EmojiStory {
                story: Vec::new(),
                current_round: 1,
            },
            GameKind::TeamTrivia => GamePayload::TeamTrivia {
                current_question: None,
                answers: HashMap::new(),
            },
        };
        Some(Self {
            kind,
            players,
            current_player_index: 0,
            scores: HashMap::new(),
            payload,
        })
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn players(&self) -> &[String] {
        &self.players
    }

    pub fn scores(&self) -> &HashMap<String, u32> {
        &self.scores
    }

    pub fn payload(&self) -> &GamePayload {
        &self.payload
    }

    pub fn current_player(&self) -> &str {
        &self.players[self.current_player_index]
    }

    /// Advance the turn pointer and return the new current player.
    pub fn advance_turn(&mut self) -> &str {
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        self.current_player()
    }

    /// Apply one action for `actor`, returning the outcome. Turn-gated kinds
    /// reject actors other than the current player.
    pub fn apply_action(&mut self, action: &GameAction, actor: &str) -> Outcome {
        if self.kind.turn_gated() && actor != self.current_player() {
            return Outcome::Rejected;
        }

        match (&mut self.payload, action) {
            (
                GamePayload::QuickPoll { question, votes, voted },
                GameAction::SubmitPoll { question: submitted },
            ) => {
                // anyone may (re)open the poll; tallies reset with it
                *question = Some(submitted.clone());
                *votes = PollVotes::default();
                voted.clear();
                Outcome::Continue
            }
            (GamePayload::QuickPoll { votes, voted, .. }, GameAction::Vote { choice }) => {
                if !voted.insert(actor.to_string()) {
                    return Outcome::Rejected;
                }
                match choice {
                    PollChoice::Yes => votes.yes += 1,
                    PollChoice::No => votes.no += 1,
                }
                if voted.len() >= self.players.len() {
                    // the closing voter takes the point
                    *self.scores.entry(actor.to_string()).or_insert(0) += 1;
                    return Outcome::End;
                }
                Outcome::Continue
            }
            (
                GamePayload::WordChain { words, last_letter, used_words },
                GameAction::SubmitWord { word },
            ) => {
                let word = word.to_lowercase();
                let Some(first) = word.chars().next() else {
                    return Outcome::Rejected;
                };
                if let Some(required) = *last_letter {
                    if first != required {
                        return Outcome::Rejected;
                    }
                }
                if used_words.contains(&word) {
                    return Outcome::Rejected;
                }
                *last_letter = word.chars().last();
                used_words.insert(word.clone());
                words.push(word);
                *self.scores.entry(actor.to_string()).or_insert(0) += 1;
                Outcome::Continue
            }
            (GamePayload::EmojiStory { story, .. }, GameAction::AddEmoji { emoji }) => {
                story.push(emoji.clone());
                *self.scores.entry(actor.to_string()).or_insert(0) += 1;
                if story.len() >= EMOJI_STORY_LENGTH {
                    Outcome::End
                } else {
                    Outcome::Continue
                }
            }
            // Team Trivia: data shape is declared but transition rules are
            // not specified yet; every action passes through unchanged.
            (GamePayload::TeamTrivia { .. }, _) => Outcome::Continue,
            _ => Outcome::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_start_with_empty_roster_returns_none() {
        // テスト項目: 空のロスターではゲームが開始されない
        // given (前提条件):

        // when (操作):
        let game = Game::start(GameKind::QuickPoll, Vec::new());

        // then (期待する結果):
        assert!(game.is_none());
    }

    #[test]
    fn test_start_snapshots_players_and_resets_turn() {
        // テスト項目: 開始時にロスターが固定され、手番は先頭から始まる
        // given (前提条件):

        // when (操作):
        let game = Game::start(GameKind::WordChain, players(&["alice", "bob"])).unwrap();

        // then (期待する結果):
        assert_eq!(game.players(), &["alice".to_string(), "bob".to_string()]);
        assert_eq!(game.current_player(), "alice");
        assert!(game.scores().is_empty());
    }

    #[test]
    fn test_advance_turn_wraps_around() {
        // テスト項目: 手番が末尾の次に先頭へ戻る
        // given (前提条件):
        let mut game = Game::start(GameKind::EmojiStory, players(&["alice", "bob"])).unwrap();

        // when (操作):
        let second = game.advance_turn().to_string();
        let third = game.advance_turn().to_string();

        // then (期待する結果):
        assert_eq!(second, "bob");
        assert_eq!(third, "alice");
    }

    #[test]
    fn test_quick_poll_full_round_ends_with_final_voter_scoring() {
        // テスト項目: 3 人全員の投票でポールが終了し、最後の投票者だけが
        //             1 点を得る（このゲーム固有の採点規則）
        // given (前提条件):
        let mut game =
            Game::start(GameKind::QuickPoll, players(&["alice", "bob", "carol"])).unwrap();
        let submit = GameAction::SubmitPoll {
            question: "Coffee?".to_string(),
        };
        assert_eq!(game.apply_action(&submit, "alice"), Outcome::Continue);

        // when (操作):
        let first = game.apply_action(&GameAction::Vote { choice: PollChoice::Yes }, "alice");
        let second = game.apply_action(&GameAction::Vote { choice: PollChoice::No }, "bob");
        let third = game.apply_action(&GameAction::Vote { choice: PollChoice::Yes }, "carol");

        // then (期待する結果):
        assert_eq!(first, Outcome::Continue);
        assert_eq!(second, Outcome::Continue);
        assert_eq!(third, Outcome::End);
        assert_eq!(game.scores().get("carol"), Some(&1));
        assert_eq!(game.scores().get("alice"), None);
        assert_eq!(game.scores().get("bob"), None);
        match game.payload() {
            GamePayload::QuickPoll { votes, .. } => {
                assert_eq!((votes.yes, votes.no), (2, 1));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_quick_poll_duplicate_vote_is_rejected() {
        // テスト項目: 同一プレイヤーの二重投票は拒否され、集計が変わらない
        // given (前提条件):
        let mut game = Game::start(GameKind::QuickPoll, players(&["alice", "bob"])).unwrap();
        let submit = GameAction::SubmitPoll {
            question: "Tea?".to_string(),
        };
        game.apply_action(&submit, "alice");
        game.apply_action(&GameAction::Vote { choice: PollChoice::Yes }, "alice");

        // when (操作):
        let outcome = game.apply_action(&GameAction::Vote { choice: PollChoice::No }, "alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Rejected);
        match game.payload() {
            GamePayload::QuickPoll { votes, voted, .. } => {
                assert_eq!((votes.yes, votes.no), (1, 0));
                assert_eq!(voted.len(), 1);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_quick_poll_resubmit_resets_tallies() {
        // テスト項目: submitPoll の再送で集計と投票済みセットがリセットされる
        // given (前提条件):
        let mut game = Game::start(GameKind::QuickPoll, players(&["alice", "bob"])).unwrap();
        game.apply_action(
            &GameAction::SubmitPoll { question: "Coffee?".to_string() },
            "alice",
        );
        game.apply_action(&GameAction::Vote { choice: PollChoice::Yes }, "alice");

        // when (操作): bob が新しい質問を出す（手番に関係なく可能）
        let outcome = game.apply_action(
            &GameAction::SubmitPoll { question: "Tea?".to_string() },
            "bob",
        );

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Continue);
        match game.payload() {
            GamePayload::QuickPoll { question, votes, voted } => {
                assert_eq!(question.as_deref(), Some("Tea?"));
                assert_eq!((votes.yes, votes.no), (0, 0));
                assert!(voted.is_empty());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_word_chain_accepts_matching_word_and_scores() {
        // テスト項目: 先頭文字が一致する単語が受理され、得点と必要文字が更新される
        // given (前提条件): lastLetter が 't'、"test" は使用済み
        let mut game = Game::start(GameKind::WordChain, players(&["alice"])).unwrap();
        game.apply_action(&GameAction::SubmitWord { word: "test".to_string() }, "alice");

        // when (操作):
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: "tiger".to_string() }, "alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(game.scores().get("alice"), Some(&2));
        match game.payload() {
            GamePayload::WordChain { words, last_letter, .. } => {
                assert_eq!(words, &["test".to_string(), "tiger".to_string()]);
                assert_eq!(*last_letter, Some('r'));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_word_chain_rejects_first_letter_mismatch() {
        // テスト項目: 必要な先頭文字と一致しない単語は拒否され、状態が変わらない
        // given (前提条件):
        let mut game = Game::start(GameKind::WordChain, players(&["alice"])).unwrap();
        game.apply_action(&GameAction::SubmitWord { word: "test".to_string() }, "alice");

        // when (操作):
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: "apple".to_string() }, "alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(game.scores().get("alice"), Some(&1));
        match game.payload() {
            GamePayload::WordChain { words, .. } => assert_eq!(words.len(), 1),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_word_chain_rejects_used_word() {
        // テスト項目: 使用済みの単語は拒否される
        // given (前提条件): "test" → "tiger" まで進んだ状態
        let mut game = Game::start(GameKind::WordChain, players(&["alice"])).unwrap();
        game.apply_action(&GameAction::SubmitWord { word: "test".to_string() }, "alice");
        game.apply_action(&GameAction::SubmitWord { word: "tiger".to_string() }, "alice");
        game.apply_action(&GameAction::SubmitWord { word: "rat".to_string() }, "alice");

        // when (操作): "test" を再提出する
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: "test".to_string() }, "alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Rejected);
        assert_eq!(game.scores().get("alice"), Some(&3));
    }

    #[test]
    fn test_word_chain_lowercases_submissions() {
        // テスト項目: 単語が小文字化されて比較・保存される
        // given (前提条件):
        let mut game = Game::start(GameKind::WordChain, players(&["alice"])).unwrap();
        game.apply_action(&GameAction::SubmitWord { word: "Test".to_string() }, "alice");

        // when (操作): 大文字始まりでも必要文字 't' に一致する
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: "TIGER".to_string() }, "alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Continue);
        match game.payload() {
            GamePayload::WordChain { words, .. } => {
                assert_eq!(words, &["test".to_string(), "tiger".to_string()]);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_word_chain_rejects_empty_word() {
        // テスト項目: 空文字の単語は拒否される
        // given (前提条件):
        let mut game = Game::start(GameKind::WordChain, players(&["alice"])).unwrap();

        // when (操作):
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: String::new() }, "alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Rejected);
    }

    #[test]
    fn test_word_chain_rejects_out_of_turn_actor() {
        // テスト項目: 手番制のゲームでは手番以外のプレイヤーの操作が拒否される
        // given (前提条件): alice の手番
        let mut game = Game::start(GameKind::WordChain, players(&["alice", "bob"])).unwrap();

        // when (操作): bob が割り込む
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: "test".to_string() }, "bob");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Rejected);
        assert!(game.scores().is_empty());
    }

    #[test]
    fn test_emoji_story_ends_after_ten_entries_in_order() {
        // テスト項目: 10 個目の絵文字で End となり、物語は提出順を保つ
        // given (前提条件):
        let mut game = Game::start(GameKind::EmojiStory, players(&["alice", "bob"])).unwrap();

        // when (操作): 手番を守って 10 回追加する
        let mut outcomes = Vec::new();
        for i in 0..10 {
            let actor = game.current_player().to_string();
            let outcome = game.apply_action(
                &GameAction::AddEmoji { emoji: format!("e{i}") },
                &actor,
            );
            outcomes.push(outcome);
            if outcome == Outcome::Continue {
                game.advance_turn();
            }
        }

        // then (期待する結果): 9 回 Continue、10 回目で End
        assert!(outcomes[..9].iter().all(|o| *o == Outcome::Continue));
        assert_eq!(outcomes[9], Outcome::End);
        match game.payload() {
            GamePayload::EmojiStory { story, .. } => {
                let expected: Vec<String> = (0..10).map(|i| format!("e{i}")).collect();
                assert_eq!(story, &expected);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_team_trivia_actions_pass_through_unchanged() {
        // テスト項目: Team Trivia は遷移規則が未定義のため、どの操作でも
        //             Continue を返し状態を変えない
        // given (前提条件):
        let mut game = Game::start(GameKind::TeamTrivia, players(&["alice", "bob"])).unwrap();
        let before = game.payload().clone();

        // when (操作):
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: "test".to_string() }, "bob");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(game.payload(), &before);
        assert!(game.scores().is_empty());
    }

    #[test]
    fn test_mismatched_action_kind_is_rejected() {
        // テスト項目: ゲーム種別に合わない操作は拒否される
        // given (前提条件):
        let mut game = Game::start(GameKind::QuickPoll, players(&["alice"])).unwrap();

        // when (操作): ポール中に単語を投げる
        let outcome =
            game.apply_action(&GameAction::SubmitWord { word: "test".to_string() }, "alice");

        // then (期待する結果):
        assert_eq!(outcome, Outcome::Rejected);
    }
}
