//! MessagePusher trait 定義
//!
//! ドメイン層が必要とするメッセージ通知のインターフェースを定義します。
//! 具体的な実装（WebSocket）は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::value_object::ConnectionId;

/// 接続ごとの送信チャンネル
///
/// 送信はファイア・アンド・フォーゲット。受信側タスクが落ちている場合のみ
/// 失敗し、その接続は切断扱いとなる。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// MessagePusher trait
///
/// 接続 ID と送信チャンネルの対応を管理し、シリアライズ済みイベントを
/// クライアントへ届ける。UseCase 層はこの trait に依存し、WebSocket の
/// 具体的な実装には依存しない。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続を登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続を登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続へ送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続へ送信し、配信に失敗した接続 ID を返す
    ///
    /// 一部の失敗は他の接続への配信を妨げない。失敗した接続の後始末
    /// （メンバーシップからの除去）は呼び出し側の責務。
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> Vec<ConnectionId>;
}
