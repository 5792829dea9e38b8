//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 つのイベントに対応する状態遷移をまとめて（アトミックに）実行します。

use async_trait::async_trait;

use super::{
    entity::Room,
    error::SessionError,
    outcome::{
        Admission, ChatDelivery, ClosedConnection, Departure, JoinOutcome, Rejection, RoomDetail,
        ShareStarted, ShareStopped,
    },
    value_object::{ConnectionId, DisplayName, MessageContent, RoomKey, Timestamp},
};

/// Session Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 接続を登録し、接続時刻を返す
    async fn connect(&self, id: ConnectionId) -> Timestamp;

    /// 参加リクエスト
    async fn request_join(
        &self,
        key: RoomKey,
        id: &ConnectionId,
        display_name: DisplayName,
    ) -> Result<JoinOutcome, SessionError>;

    /// 入室許可（ホストのみ）
    async fn admit(
        &self,
        key: &RoomKey,
        requester: &ConnectionId,
        acting: &ConnectionId,
    ) -> Result<Admission, SessionError>;

    /// 入室拒否（ホストのみ）
    async fn reject(
        &self,
        key: &RoomKey,
        requester: &ConnectionId,
        acting: &ConnectionId,
    ) -> Result<Rejection, SessionError>;

    /// メンバーの退出（ホストのみ）
    async fn kick(
        &self,
        acting: &ConnectionId,
        target: &ConnectionId,
    ) -> Result<Departure, SessionError>;

    /// シグナルの中継可否を確認
    async fn route_signal(&self, from: &ConnectionId, to: &ConnectionId)
    -> Result<(), SessionError>;

    /// 同じルームの他のメンバー
    async fn peers_of(
        &self,
        from: &ConnectionId,
    ) -> Result<(RoomKey, Vec<ConnectionId>), SessionError>;

    /// 画面共有の開始
    async fn request_share(&self, id: &ConnectionId) -> Result<ShareStarted, SessionError>;

    /// 画面共有の停止
    async fn stop_share(&self, id: &ConnectionId) -> Result<Option<ShareStopped>, SessionError>;

    /// チャットメッセージの配送先を決める
    async fn post_chat(
        &self,
        from: &ConnectionId,
        content: MessageContent,
    ) -> Result<ChatDelivery, SessionError>;

    /// 接続終了時の後片付け
    async fn close_connection(&self, id: &ConnectionId) -> ClosedConnection;

    /// 全ルーム
    async fn get_rooms(&self) -> Vec<Room>;

    /// ルーム詳細
    async fn get_room_detail(&self, key: &RoomKey) -> Option<RoomDetail>;

    /// 接続中のクライアント数
    async fn count_connections(&self) -> usize;
}
