//! UseCase: 絵文字投稿処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostEmojiUseCase::execute() メソッド
//! - メッセージの履歴への追加と 100 件上限の維持
//!
//! ### なぜこのテストが必要か
//! - 投稿がブロードキャスト用のメッセージを返すことを保証
//! - 履歴上限（古い順に破棄）を UseCase 経由でも維持することを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：投稿とメッセージ生成
//! - 異常系：消滅済みルームへの投稿
//! - エッジケース：上限を超える投稿

use std::sync::Arc;

use tamariba_shared::time::Clock;

use crate::domain::{DisplayName, EmojiMessage, RoomId, RoomRegistry, Timestamp};

use super::error::RoomEventError;

/// 絵文字投稿のユースケース
pub struct PostEmojiUseCase {
    /// RoomRegistry（ルーム登録簿の抽象化）
    registry: Arc<dyn RoomRegistry>,
    /// Clock（時刻の抽象化）
    clock: Arc<dyn Clock>,
}

impl PostEmojiUseCase {
    /// 新しい PostEmojiUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// 絵文字投稿を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 投稿先のルーム
    /// * `author` - 投稿者の表示名
    /// * `emoji` - 絵文字ペイロード
    ///
    /// # Returns
    ///
    /// * `Ok(EmojiMessage)` - 追加されたメッセージ（ブロードキャスト用）
    /// * `Err(RoomEventError)` - ルームが存在しない
    pub async fn execute(
        &self,
        room_id: &RoomId,
        author: &DisplayName,
        emoji: String,
    ) -> Result<EmojiMessage, RoomEventError> {
        let now = Timestamp::new(self.clock.now_millis());
        let mut room = self
            .registry
            .acquire(room_id)
            .await
            .ok_or(RoomEventError::NotInRoom)?;
        let message = room.post_message(author.clone(), emoji, now);

        tracing::debug!(
            "'{}' posted message '{}' to room '{}'",
            author.as_str(),
            message.id.as_str(),
            room_id.as_str()
        );

        Ok(message)
    }
}
