//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 入力検証（空の Room ID / 表示名、文字数超過）とルームへの参加
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：不正な join がルーム状態を変えないこと
//! - ロスターに全メンバーがちょうど 1 回ずつ載ることを保証
//! - 参加者自身の identity で履歴が投影されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成を伴う参加、既存ルームへの参加
//! - 異常系：空の Room ID / 表示名、51 文字の表示名
//! - エッジケース：リアクション付き履歴を持つルームへの後入り

use std::sync::Arc;

use tamariba_shared::time::Clock;

use crate::domain::{
    ClientIdentity, ConnectionId, DisplayName, Member, MessageProjection, RoomId, RoomRegistry,
    Timestamp,
};

use super::error::JoinError;

/// 参加結果: ハンドラが broadcast / push に使う素材一式
#[derive(Debug)]
pub struct JoinOutcome {
    /// 正規化済みの Room ID
    pub room_id: RoomId,
    /// 正規化済みの表示名
    pub name: DisplayName,
    /// 参加直後のロスター（参加者自身を含む、順序不定）
    pub roster: Vec<String>,
    /// 参加者の identity で投影した履歴（空ならイベント送信なし）
    pub history: Vec<MessageProjection>,
}

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `identity` - 接続のネットワーク identity
    /// * `room_id` - クライアントが指定した Room ID（未検証）
    /// * `name` - クライアントが指定した表示名（未検証）
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 参加成功
    /// * `Err(JoinError)` - 検証エラー（ルーム状態は変化しない）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        identity: ClientIdentity,
        room_id: &str,
        name: &str,
    ) -> Result<JoinOutcome, JoinError> {
        let room_id = RoomId::new(room_id)?;
        let name = DisplayName::new(name)?;

        let now = Timestamp::new(self.clock.now_millis());
        let mut room = self.registry.acquire_or_create(&room_id, now).await;
        room.join(
            connection_id,
            Member {
                name: name.clone(),
                identity: identity.clone(),
            },
            now,
        );
        let roster = room.roster();
        let history = room.project_history(&identity);
        drop(room);

        tracing::info!(
            "'{}' joined room '{}' ({} member(s))",
            name.as_str(),
            room_id.as_str(),
            roster.len()
        );

        Ok(JoinOutcome {
            room_id,
            name,
            roster,
            history,
        })
    }
}
