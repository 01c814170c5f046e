//! UseCase: リアクション処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ReactToMessageUseCase::execute() メソッド
//! - identity 単位の重複排除（ラベル間の移動）と変更イベントの順序
//!
//! ### なぜこのテストが必要か
//! - 「1 identity につき 1 メッセージあたり高々 1 リアクション」の
//!   不変条件を UseCase 経由でも保証する
//! - 除去 → 追加 のイベント順がブロードキャスト順を決めることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回リアクション、ラベル移動
//! - 異常系：存在しないメッセージ、消滅済みルーム

use std::sync::Arc;

use tamariba_shared::time::Clock;

use crate::domain::{
    ClientIdentity, DisplayName, ReactionChange, RoomError, RoomId, RoomRegistry, Timestamp,
};

use super::error::RoomEventError;

/// リアクションのユースケース
pub struct ReactToMessageUseCase {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl ReactToMessageUseCase {
    /// 新しい ReactToMessageUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// リアクションを実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 対象ルーム
    /// * `message_id` - 対象メッセージの ID（クライアント指定の生文字列）
    /// * `label` - リアクションラベル
    /// * `reactor` - リアクションする接続の現在の表示名
    /// * `identity` - リアクションする接続の identity（重複排除キー）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ReactionChange>)` - ブロードキャスト順の変更イベント
    ///   （移動の場合は除去が先）
    /// * `Err(RoomEventError)` - ルームまたはメッセージが存在しない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        message_id: &str,
        label: &str,
        reactor: &DisplayName,
        identity: &ClientIdentity,
    ) -> Result<Vec<ReactionChange>, RoomEventError> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut room = self
            .registry
            .acquire(room_id)
            .await
            .ok_or(RoomEventError::NotInRoom)?;
        room.react(message_id, label, reactor, identity, now)
            .map_err(|err| match err {
                RoomError::MessageNotFound => RoomEventError::MessageNotFound,
            })
    }
}
