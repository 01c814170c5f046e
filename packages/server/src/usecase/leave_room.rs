//! UseCase: ルーム退出処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - メンバーシップからの除去と、残メンバー向けロスターの算出
//!
//! ### なぜこのテストが必要か
//! - 退出後のロスターが正しいことを保証
//! - 最後のメンバーの退出ではロスター通知が発生しないことを確認
//!   （ルームは休眠状態になり、スイープの対象になる）
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーが残る退出
//! - エッジケース：最後のメンバーの退出、未参加接続の退出

use std::sync::Arc;

use tamariba_shared::time::Clock;

use crate::domain::{ConnectionId, RoomId, RoomRegistry, Timestamp};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ルーム退出を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 退出する接続の ID
    /// * `room_id` - 接続が参加していたルーム
    ///
    /// # Returns
    ///
    /// * `Some(roster)` - メンバーが残っている（ロスター通知が必要）
    /// * `None` - ルームが空になった、既に消えている、または未参加
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: &RoomId,
    ) -> Option<Vec<String>> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut room = self.registry.acquire(room_id).await?;
        let member = room.leave(connection_id, now)?;

        tracing::info!(
            "'{}' left room '{}' ({} member(s) remaining)",
            member.name.as_str(),
            room_id.as_str(),
            room.member_count()
        );

        if room.is_empty() {
            None
        } else {
            Some(room.roster())
        }
    }
}
