//! UseCase: ゲームアクション処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GameActionUseCase::execute() メソッド
//! - 遷移結果（Continue / End / Rejected）ごとの後処理
//!
//! ### なぜこのテストが必要か
//! - Continue で手番が進み、更新ペイロードが返ることを保証
//! - End でスコアが返り、ゲームが片付けられることを確認
//! - Rejected が状態を一切変えないことを保証（ブロードキャストなし）
//!
//! ### どのような状況を想定しているか
//! - 正常系：Word Chain の進行、ポールの完了
//! - 異常系：アクティブなゲームがない、消滅済みルーム
//! - エッジケース：拒否されたアクションの後も手番が変わらない

use std::collections::HashMap;
use std::sync::Arc;

use tamariba_shared::time::Clock;

use crate::domain::{DisplayName, GameAction, GamePayload, Outcome, RoomId, RoomRegistry, Timestamp};

use super::error::RoomEventError;

/// アクション適用の結果: ハンドラのブロードキャスト内容を決める
#[derive(Debug)]
pub enum GameActionOutcome {
    /// ゲーム続行。gameUpdate をブロードキャストする。
    Continued {
        game_data: GamePayload,
        next_player: String,
    },
    /// ゲーム終了。gameEnd をブロードキャストする。
    Ended { scores: HashMap<String, u32> },
    /// アクション拒否。状態変化もブロードキャストもなし。
    Rejected,
}

/// ゲームアクションのユースケース
pub struct GameActionUseCase {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl GameActionUseCase {
    /// 新しい GameActionUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ゲームアクションを実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `action` - パース済みのアクション
    /// * `actor` - アクションを行う接続の表示名
    ///
    /// # Returns
    ///
    /// * `Ok(GameActionOutcome)` - 適用結果
    /// * `Err(RoomEventError)` - ルームまたはアクティブなゲームがない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        action: &GameAction,
        actor: &DisplayName,
    ) -> Result<GameActionOutcome, RoomEventError> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut room = self
            .registry
            .acquire(room_id)
            .await
            .ok_or(RoomEventError::NotInRoom)?;

        let Some(game) = room.game_mut() else {
            return Err(RoomEventError::NoActiveGame);
        };

        match game.apply_action(action, actor.as_str()) {
            Outcome::Rejected => Ok(GameActionOutcome::Rejected),
            Outcome::Continue => {
                let next_player = game.advance_turn().to_string();
                let game_data = game.payload().clone();
                room.touch(now);
                Ok(GameActionOutcome::Continued {
                    game_data,
                    next_player,
                })
            }
            Outcome::End => {
                let scores = game.scores().clone();
                room.clear_game();
                room.touch(now);
                tracing::info!("Game ended in room '{}'", room_id.as_str());
                Ok(GameActionOutcome::Ended { scores })
            }
        }
    }
}
