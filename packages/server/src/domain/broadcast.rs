//! RoomBroadcaster trait 定義
//!
//! ルーム全体へのイベント配信のインターフェース。具体的な実装
//! （MessagePusher 上のファンアウトと死亡接続の除去）は Infrastructure 層が
//! 提供します（依存性の逆転）。

use async_trait::async_trait;

use super::value_object::RoomId;

/// RoomBroadcaster trait
///
/// シリアライズ済みイベントを、呼び出し時点のメンバーシップスナップショット
/// 全員へ届ける。配信に失敗した接続は leave と同様に除去され、残りの
/// メンバーへロスター更新が流れる。エラーは返さない — 配信失敗は内部で
/// 回復され、他の接続へ波及しない。
#[async_trait]
pub trait RoomBroadcaster: Send + Sync {
    /// ルームの全メンバーへイベントを配信
    async fn broadcast(&self, room_id: &RoomId, payload: &str);
}
