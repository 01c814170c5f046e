//! UseCase 層のエラー型定義
//!
//! Display 文言がそのまま該当接続へ返る error イベントのメッセージになる。
//! どのエラーも他の接続やプロセスには波及しない。

use thiserror::Error;

use crate::domain::{DisplayNameError, RoomIdError};

/// ルーム参加のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// Room ID または表示名がトリム後に空
    #[error("Room ID and name are required")]
    MissingFields,
    /// 表示名が 50 文字を超えている
    #[error("Name is too long (max 50 characters)")]
    NameTooLong,
    /// この接続は既にルームに参加している（ルームの移動は再接続で行う）
    #[error("Already in a room")]
    AlreadyJoined,
}

impl From<RoomIdError> for JoinError {
    fn from(_: RoomIdError) -> Self {
        Self::MissingFields
    }
}

impl From<DisplayNameError> for JoinError {
    fn from(err: DisplayNameError) -> Self {
        match err {
            DisplayNameError::Empty => Self::MissingFields,
            DisplayNameError::TooLong { .. } => Self::NameTooLong,
        }
    }
}

/// ルームスコープのイベント処理エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomEventError {
    /// join 前（またはルーム消滅後）のルームスコープイベント
    #[error("Not in a room")]
    NotInRoom,
    /// 履歴に存在しないメッセージへのリアクション
    #[error("Message not found")]
    MessageNotFound,
    /// アクティブなゲームがない状態での gameAction
    #[error("No active game")]
    NoActiveGame,
}
