//! UseCase: アイドルルームの掃除
//!
//! 空のまま放置されたルームを定期的に削除する。メンバーのいるルームは
//! 削除されない。UI 層が SWEEP_INTERVAL ごとにこの UseCase を実行する。

use std::sync::Arc;
use std::time::Duration;

use tamariba_shared::time::Clock;

use crate::domain::{RoomId, RoomRegistry, Timestamp};

/// 空ルームが削除対象になるまでのアイドル時間
pub const IDLE_ROOM_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// スイープの実行間隔
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// アイドルルーム掃除のユースケース
pub struct SweepIdleRoomsUseCase {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl SweepIdleRoomsUseCase {
    /// 新しい SweepIdleRoomsUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// スイープを 1 回実行し、削除したルームの ID を返す
    pub async fn execute(&self) -> Vec<RoomId> {
        let now = Timestamp::new(self.clock.now_millis());
        let removed = self.registry.sweep_idle(now, IDLE_ROOM_TIMEOUT).await;
        for room_id in &removed {
            tracing::info!("Removed inactive room: {}", room_id.as_str());
        }
        removed
    }
}
