//! UseCase: ゲーム開始処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - StartGameUseCase::execute() メソッド
//! - ロスターのスナップショットとゲームの設置
//!
//! ### なぜこのテストが必要か
//! - 開始時点のロスターがプレイヤーとして固定されることを保証
//! - 空ルームでの開始が静かに無視されることを確認
//! - 進行中ゲームの置き換え（startGame は常に新規ゲームを設置する）
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーのいるルームでの開始
//! - エッジケース：空ルームでの開始、進行中ゲームの置き換え

use std::sync::Arc;

use tamariba_shared::time::Clock;

use crate::domain::{Game, GameKind, GamePayload, RoomId, RoomRegistry, Timestamp};

use super::error::RoomEventError;

/// 開始結果: ハンドラが gameStart イベントに使う素材一式
#[derive(Debug)]
pub struct GameStarted {
    /// ゲーム種別
    pub kind: GameKind,
    /// 初期ペイロード
    pub initial_data: GamePayload,
    /// 最初の手番プレイヤー
    pub first_player: String,
}

/// ゲーム開始のユースケース
pub struct StartGameUseCase {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl StartGameUseCase {
    /// 新しい StartGameUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ゲーム開始を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `kind` - 開始するゲーム種別
    ///
    /// # Returns
    ///
    /// * `Ok(Some(GameStarted))` - 開始成功
    /// * `Ok(None)` - ルームが空（静かに無視、ブロードキャストなし）
    /// * `Err(RoomEventError)` - ルームが存在しない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        kind: GameKind,
    ) -> Result<Option<GameStarted>, RoomEventError> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut room = self
            .registry
            .acquire(room_id)
            .await
            .ok_or(RoomEventError::NotInRoom)?;

        let Some(game) = Game::start(kind, room.roster()) else {
            tracing::debug!(
                "Ignoring game start in empty room '{}'",
                room_id.as_str()
            );
            return Ok(None);
        };

        let started = GameStarted {
            kind: game.kind(),
            initial_data: game.payload().clone(),
            first_player: game.current_player().to_string(),
        };
        room.set_game(game);
        room.touch(now);

        tracing::info!(
            "Game '{:?}' started in room '{}' (first player '{}')",
            started.kind,
            room_id.as_str(),
            started.first_player
        );

        Ok(Some(started))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClientIdentity, ConnectionId, DisplayName, Member};
    use crate::infrastructure::registry::InMemoryRoomRegistry;
    use tamariba_shared::time::FixedClock;

    fn member(name: &str, identity: &str) -> Member {
        Member {
            name: DisplayName::new(name).unwrap(),
            identity: ClientIdentity::new(identity),
        }
    }

    async fn create_room(
        registry: &Arc<InMemoryRoomRegistry>,
        members: &[(&str, &str, &str)],
    ) -> RoomId {
        let room_id = RoomId::new("lounge").unwrap();
        let mut room = registry
            .acquire_or_create(&room_id, Timestamp::new(1000))
            .await;
        for (conn, name, identity) in members {
            room.join(
                ConnectionId::new(*conn),
                member(name, identity),
                Timestamp::new(1000),
            );
        }
        drop(room);
        room_id
    }

    #[tokio::test]
    async fn test_start_game_snapshots_roster() {
        // テスト項目: 開始時のロスターがプレイヤーとして固定される
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = StartGameUseCase::new(registry.clone(), Arc::new(FixedClock::new(5000)));
        let room_id = create_room(&registry, &[("conn-1", "alice", "10.0.0.1")]).await;

        // when (操作):
        let started = usecase
            .execute(&room_id, GameKind::WordChain)
            .await
            .unwrap()
            .unwrap();

        // then (期待する結果):
        assert_eq!(started.kind, GameKind::WordChain);
        assert_eq!(started.first_player, "alice");
        let room = registry.acquire(&room_id).await.unwrap();
        let game = room.game().unwrap();
        assert_eq!(game.players(), &["alice".to_string()]);
    }

    #[tokio::test]
    async fn test_start_game_in_empty_room_is_silent_noop() {
        // テスト項目: 空ルームでの開始は None を返し、ゲームは設置されない
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = StartGameUseCase::new(registry.clone(), Arc::new(FixedClock::new(5000)));
        let room_id = create_room(&registry, &[]).await;

        // when (操作):
        let result = usecase.execute(&room_id, GameKind::QuickPoll).await.unwrap();

        // then (期待する結果):
        assert!(result.is_none());
        let room = registry.acquire(&room_id).await.unwrap();
        assert!(room.game().is_none());
    }

    #[tokio::test]
    async fn test_start_game_replaces_active_game() {
        // テスト項目: 進行中のゲームがあっても新しいゲームで置き換わる
        // given (前提条件): Word Chain が進行中
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = StartGameUseCase::new(registry.clone(), Arc::new(FixedClock::new(5000)));
        let room_id = create_room(&registry, &[("conn-1", "alice", "10.0.0.1")]).await;
        usecase.execute(&room_id, GameKind::WordChain).await.unwrap();

        // when (操作):
        let started = usecase
            .execute(&room_id, GameKind::QuickPoll)
            .await
            .unwrap()
            .unwrap();

        // then (期待する結果):
        assert_eq!(started.kind, GameKind::QuickPoll);
        let room = registry.acquire(&room_id).await.unwrap();
        assert_eq!(room.game().unwrap().kind(), GameKind::QuickPoll);
    }

    #[tokio::test]
    async fn test_start_game_in_missing_room_is_error() {
        // テスト項目: 消滅済みルームでの開始はエラーになる
        // given (前提条件):
        let registry = Arc::new(InMemoryRoomRegistry::new());
        let usecase = StartGameUseCase::new(registry, Arc::new(FixedClock::new(5000)));

        // when (操作):
        let result = usecase
            .execute(&RoomId::new("ghost-town").unwrap(), GameKind::QuickPoll)
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), RoomEventError::NotInRoom);
    }
}
