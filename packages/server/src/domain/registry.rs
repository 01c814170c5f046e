//! RoomRegistry trait 定義
//!
//! ドメイン層が必要とするルーム登録簿のインターフェースを定義します。
//! 具体的な実装（インメモリ）は Infrastructure 層が提供します（依存性の逆転）。

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::entity::Room;
use super::value_object::{RoomId, Timestamp};

/// RoomRegistry trait
///
/// Room ID から Room への対応を所有し、ルームごとの排他ガードを払い出す。
/// ガードがルーム状態（メンバーシップ・履歴・リアクション・ゲーム遷移）の
/// 直列化点であり、同一ルームへの並行操作はここで順序付けられる。
///
/// ## ロック規約
///
/// - ルームのロックは必ず登録簿内部の外側ロックを保持したまま取得される。
///   `sweep_idle` はこの規約を前提に、外側ロック下の try_lock で
///   「空かつアイドル」判定を原子的に行う（判定後にメンバーが入る余地がない）。
/// - 呼び出し側はルームガードを保持したまま登録簿を再度呼んではならない。
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 既存ルームの排他ガードを取得（存在しなければ None）
    async fn acquire(&self, room_id: &RoomId) -> Option<OwnedMutexGuard<Room>>;

    /// ルームの排他ガードを取得（初回 join 時は空ルームを原子的に作成）
    async fn acquire_or_create(&self, room_id: &RoomId, now: Timestamp) -> OwnedMutexGuard<Room>;

    /// 現存する全ルームの ID を取得
    async fn room_ids(&self) -> Vec<RoomId>;

    /// 現存するルーム数を取得
    async fn room_count(&self) -> usize;

    /// 空かつ `idle_threshold` を超えてアイドルなルームを削除し、
    /// 削除したルームの ID を返す
    ///
    /// メンバーが 1 人でもいるルームは、どれだけアイドルでも削除されない。
    async fn sweep_idle(&self, now: Timestamp, idle_threshold: Duration) -> Vec<RoomId>;
}
