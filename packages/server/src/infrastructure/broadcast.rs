//! ルーム全体へのファンアウト配信実装
//!
//! ドメイン層が定義する RoomBroadcaster trait の具体的な実装。
//! 呼び出し時点のメンバーシップスナップショットへ MessagePusher 経由で
//! 配信し、届かなかった接続を leave と同様に除去します。除去が発生した
//! 場合は残りのメンバーへロスター更新を流し、その配信にも失敗があれば
//! メンバーがいなくなるまで同じ手順を繰り返します（各周回で必ず 1 接続
//! 以上減るため停止します）。

use std::sync::Arc;

use async_trait::async_trait;

use tamariba_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, RoomBroadcaster, RoomId, RoomRegistry, Timestamp,
};
use crate::infrastructure::dto::websocket::OutboundMessage;

/// MessagePusher 上のファンアウト配信
pub struct FanoutBroadcaster {
    /// RoomRegistry（メンバーシップスナップショットの供給源）
    registry: Arc<dyn RoomRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
    /// Clock（除去時の last_activity 更新用）
    clock: Arc<dyn Clock>,
}

impl FanoutBroadcaster {
    /// 新しい FanoutBroadcaster を作成
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            pusher,
            clock,
        }
    }

    /// 配信に失敗した接続をメンバーシップと MessagePusher から除去し、
    /// 残りのメンバーへ流すロスター更新を返す（全員いなくなれば None）
    async fn evict_dead_connections(
        &self,
        room_id: &RoomId,
        dead: &[ConnectionId],
    ) -> Option<String> {
        let now = Timestamp::new(self.clock.now_millis());
        let roster = {
            let mut room = self.registry.acquire(room_id).await?;
            for connection_id in dead {
                if room.leave(connection_id, now).is_some() {
                    tracing::warn!(
                        "Evicted unreachable connection '{}' from room '{}'",
                        connection_id.as_str(),
                        room_id.as_str()
                    );
                }
            }
            if room.is_empty() {
                None
            } else {
                Some(room.roster())
            }
        };

        for connection_id in dead {
            self.pusher.unregister_client(connection_id).await;
        }

        let users = roster?;
        serde_json::to_string(&OutboundMessage::Users { users }).ok()
    }
}

#[async_trait]
impl RoomBroadcaster for FanoutBroadcaster {
    async fn broadcast(&self, room_id: &RoomId, payload: &str) {
        let mut pending = Some(payload.to_string());
        while let Some(json) = pending.take() {
            let targets = match self.registry.acquire(room_id).await {
                Some(room) => room.member_connections(),
                None => return,
            };
            if targets.is_empty() {
                return;
            }
            let failed = self.pusher.broadcast(targets, &json).await;
            if failed.is_empty() {
                return;
            }
            pending = self.evict_dead_connections(room_id, &failed).await;
        }
    }
}
