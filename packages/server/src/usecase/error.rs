//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{MessagePushError, SessionError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

impl UseCaseError {
    /// 対象が既に存在しない（no-op として扱える）エラーか
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Session(e) => e.is_not_found(),
            Self::Push(MessagePushError::ClientNotFound(_)) => true,
            Self::Push(_) => false,
        }
    }
}
