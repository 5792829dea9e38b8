//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::ConnectionId;

/// 値オブジェクトの生成に失敗した場合のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    ConnectionIdEmpty,

    #[error("room key must not be empty")]
    RoomKeyEmpty,

    #[error("room key must be at most {0} characters")]
    RoomKeyTooLong(usize),

    #[error("message content must not be empty")]
    MessageContentEmpty,

    #[error("message content must be at most {0} characters")]
    MessageContentTooLong(usize),
}

/// ルーム・接続の状態遷移に関するエラー
///
/// `NotFound` 系は呼び出し側で no-op として扱い、致命的なエラーにはしない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("room '{0}' does not exist")]
    RoomNotFound(String),

    #[error("no pending join request from '{0}'")]
    RequestNotFound(String),

    #[error("'{0}' is not a member of the room")]
    NotAMember(String),

    #[error("only the host may {0}")]
    Forbidden(&'static str),

    #[error("'{holder}' is already sharing a screen")]
    AlreadySharing { holder: ConnectionId },

    #[error("already joined or waiting in room '{0}'")]
    AlreadyInAnotherRoom(String),

    #[error("not a member of any room")]
    NotInRoom,

    #[error("cannot {0} yourself")]
    SelfTarget(&'static str),
}

impl SessionError {
    /// 存在しない対象への操作（no-op として扱うべきもの）かどうか
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ConnectionNotFound(_) | Self::RoomNotFound(_) | Self::RequestNotFound(_)
        )
    }
}
