//! InMemory RoomRegistry 実装
//!
//! ドメイン層が定義する RoomRegistry trait の具体的な実装。
//! HashMap をインメモリストアとして使用します。状態は揮発性で、
//! プロセス再起動とともに失われます（永続化は非目標）。
//!
//! ## ロック構造
//!
//! 外側の Mutex が Room ID → Room の対応を守り、各 Room は Arc<Mutex<Room>>
//! として払い出されます。ルームのロックは常に外側ロックを保持したまま取得
//! するため、`sweep_idle` は外側ロック下の try_lock 成功をもって
//! 「進行中の操作がない」ことを確認できます。try_lock に失敗したルームは
//! 使用中とみなし、そのスイープでは削除しません。

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::{Room, RoomId, RoomRegistry, Timestamp};

/// インメモリ RoomRegistry 実装
pub struct InMemoryRoomRegistry {
    /// 現存するルーム
    ///
    /// Key: RoomId
    /// Value: ルーム本体（ルームごとの排他ガードの供給源）
    rooms: Mutex<HashMap<RoomId, Arc<Mutex<Room>>>>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn acquire(&self, room_id: &RoomId) -> Option<OwnedMutexGuard<Room>> {
        let rooms = self.rooms.lock().await;
        let room = rooms.get(room_id)?.clone();
        // 外側ロックを保持したままルームロックを取得する（ロック規約）
        Some(room.lock_owned().await)
    }

    async fn acquire_or_create(&self, room_id: &RoomId, now: Timestamp) -> OwnedMutexGuard<Room> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_id.as_str());
                Arc::new(Mutex::new(Room::new(room_id.clone(), now)))
            })
            .clone();
        room.lock_owned().await
    }

    async fn room_ids(&self) -> Vec<RoomId> {
        let rooms = self.rooms.lock().await;
        rooms.keys().cloned().collect()
    }

    async fn room_count(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }

    async fn sweep_idle(&self, now: Timestamp, idle_threshold: Duration) -> Vec<RoomId> {
        let idle_millis = idle_threshold.as_millis() as i64;
        let mut rooms = self.rooms.lock().await;
        let mut removed = Vec::new();
        rooms.retain(|room_id, room| {
            match room.clone().try_lock_owned() {
                Ok(guard) => {
                    let idle_for = now.value() - guard.last_activity().value();
                    if guard.is_empty() && idle_for > idle_millis {
                        removed.push(room_id.clone());
                        false
                    } else {
                        true
                    }
                }
                // ロックが取れない = 進行中の操作がある。次回のスイープに回す。
                Err(_) => true,
            }
        });
        removed
    }
}
