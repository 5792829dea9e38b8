//! エンティティ
//!
//! 接続・ルーム・入室待ち・チャットメッセージの定義。

use serde::Serialize;

use super::{
    error::SessionError,
    screen_share::ScreenShareLock,
    value_object::{ConnectionId, DisplayName, MessageContent, RoomKey, Timestamp},
};

/// 1 本のライブな接続
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub display_name: DisplayName,
    pub joined_at: Timestamp,
}

impl Connection {
    pub fn new(id: ConnectionId, joined_at: Timestamp) -> Self {
        Self {
            id,
            display_name: DisplayName::guest(),
            joined_at,
        }
    }
}

/// 参加者（ID と表示名の組）
///
/// `user-joined` の参加者リストなど、通知に載せるための軽量な表現。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    pub id: ConnectionId,
    pub display_name: DisplayName,
}

/// 入室待ちのリクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaitingEntry {
    pub connection_id: ConnectionId,
    pub display_name: DisplayName,
    pub requested_at: Timestamp,
}

impl From<WaitingEntry> for Participant {
    fn from(entry: WaitingEntry) -> Self {
        Self {
            id: entry.connection_id,
            display_name: entry.display_name,
        }
    }
}

/// チャットメッセージ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub from: ConnectionId,
    pub sender_name: DisplayName,
    pub content: MessageContent,
    pub timestamp: Timestamp,
}

/// メンバーを外した結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberRemoval {
    /// 実際にメンバーから外れたか（非メンバーなら false）
    pub removed: bool,
    /// ホストが抜けて新しく選ばれたホスト
    pub new_host: Option<ConnectionId>,
    /// 画面共有のロックを解放したか
    pub share_released: bool,
}

/// 会議ルーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub key: RoomKey,
    /// 入室順のメンバー（重複なし）
    pub members: Vec<ConnectionId>,
    pub host: Option<ConnectionId>,
    /// 入室待ちのキュー（リクエスト順）
    pub waiting: Vec<WaitingEntry>,
    pub screen_share: ScreenShareLock,
    pub messages: Vec<ChatMessage>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(key: RoomKey, created_at: Timestamp) -> Self {
        Self {
            key,
            members: Vec::new(),
            host: None,
            waiting: Vec::new(),
            screen_share: ScreenShareLock::default(),
            messages: Vec::new(),
            created_at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_member(&self, id: &ConnectionId) -> bool {
        self.members.contains(id)
    }

    pub fn is_host(&self, id: &ConnectionId) -> bool {
        self.host.as_ref() == Some(id)
    }

    pub fn is_waiting(&self, id: &ConnectionId) -> bool {
        self.waiting.iter().any(|entry| &entry.connection_id == id)
    }

    /// メンバーを追加する。既にメンバーなら何もせず false を返す。
    pub fn add_member(&mut self, id: ConnectionId) -> bool {
        if self.is_member(&id) {
            return false;
        }
        self.members.push(id);
        true
    }

    /// ホストを設定する。メンバー以外はホストにできない。
    pub fn set_host(&mut self, id: &ConnectionId) -> Result<(), SessionError> {
        if !self.is_member(id) {
            return Err(SessionError::NotAMember(id.to_string()));
        }
        self.host = Some(id.clone());
        Ok(())
    }

    /// メンバーを外す。
    ///
    /// ホストが外れた場合は、残りのメンバーのうち最も早く入室した者を新しいホストにする。
    /// 残りがいなければホストは `None` になる。
    pub fn remove_member(&mut self, id: &ConnectionId) -> MemberRemoval {
        let Some(position) = self.members.iter().position(|member| member == id) else {
            return MemberRemoval::default();
        };
        self.members.remove(position);

        let share_released = self.screen_share.release(id);

        let mut new_host = None;
        if self.is_host(id) {
            self.host = self.members.first().cloned();
            new_host = self.host.clone();
        }

        MemberRemoval {
            removed: true,
            new_host,
            share_released,
        }
    }

    /// 入室待ちに追加する。既に待っている場合は false を返す。
    pub fn enqueue(&mut self, entry: WaitingEntry) -> bool {
        if self.is_waiting(&entry.connection_id) {
            return false;
        }
        self.waiting.push(entry);
        true
    }

    /// 入室待ちから取り出す。
    pub fn take_waiting(&mut self, id: &ConnectionId) -> Option<WaitingEntry> {
        let position = self
            .waiting
            .iter()
            .position(|entry| &entry.connection_id == id)?;
        Some(self.waiting.remove(position))
    }

    /// 指定した接続以外のメンバー
    pub fn members_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .filter(|member| *member != exclude)
            .cloned()
            .collect()
    }

    /// チャット履歴に追加する。`limit` を超えた分は古いものから捨てる。
    pub fn push_message(&mut self, message: ChatMessage, limit: Option<usize>) {
        self.messages.push(message);
        if let Some(limit) = limit {
            let overflow = self.messages.len().saturating_sub(limit);
            if overflow > 0 {
                self.messages.drain(..overflow);
            }
        }
    }
}
