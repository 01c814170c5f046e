//! ドメイン層のエラー型定義
//!
//! 各値オブジェクト・エンティティの不変条件違反を表すエラー。
//! クライアントへ返す文言は UseCase 層のエラー型が持つ。

use thiserror::Error;

/// RoomId の検証エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomIdError {
    /// 空文字（トリム後）の Room ID
    #[error("room id must not be empty")]
    Empty,
}

/// DisplayName の検証エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisplayNameError {
    /// 空文字（トリム後）の表示名
    #[error("display name must not be empty")]
    Empty,
    /// 文字数超過の表示名
    #[error("display name is too long: {length} chars")]
    TooLong { length: usize },
}

/// Room 操作のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// 指定された ID のメッセージが履歴に存在しない
    #[error("message not found")]
    MessageNotFound,
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    /// 接続が登録されていない
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
    /// 送信チャンネルへの書き込み失敗
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
