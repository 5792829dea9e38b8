//! WebSocket frame DTOs.
//!
//! Every frame is a JSON object discriminated by a kebab-case `type`, with
//! camelCase fields.

use serde::{Deserialize, Serialize};

/// Frames sent by browser clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    JoinRequest {
        room_key: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
    },
    AdmitUser {
        identity: String,
        room_key: String,
    },
    RejectUser {
        identity: String,
        room_key: String,
    },
    KickUser {
        identity: String,
    },
    /// `payload` is an opaque SDP offer/answer or ICE candidate.
    Signal {
        to: String,
        payload: serde_json::Value,
    },
    VideoToggle {
        enabled: bool,
    },
    RequestScreenShare,
    StopScreenShare,
    ChatMessage {
        message: String,
    },
}

impl ClientMessage {
    /// The frame's `type` value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::JoinRequest { .. } => "join-request",
            Self::AdmitUser { .. } => "admit-user",
            Self::RejectUser { .. } => "reject-user",
            Self::KickUser { .. } => "kick-user",
            Self::Signal { .. } => "signal",
            Self::VideoToggle { .. } => "video-toggle",
            Self::RequestScreenShare => "request-screen-share",
            Self::StopScreenShare => "stop-screen-share",
            Self::ChatMessage { .. } => "chat-message",
        }
    }
}

/// A room member as listed in `user-joined`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub identity: String,
    pub username: String,
}

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    Connected {
        identity: String,
    },
    RoomJoined {
        room_key: String,
        is_host: bool,
        username: String,
    },
    WaitForHost {
        room_key: String,
    },
    UserRequestedJoin {
        room_key: String,
        identity: String,
        username: String,
    },
    JoinRequestWithdrawn {
        room_key: String,
        identity: String,
    },
    JoinRejected {
        room_key: String,
    },
    Kicked {
        room_key: String,
    },
    UserJoined {
        identity: String,
        username: String,
        members: Vec<MemberInfo>,
    },
    UserLeft {
        identity: String,
    },
    HostChanged {
        identity: String,
        username: String,
    },
    Signal {
        from: String,
        payload: serde_json::Value,
    },
    VideoToggle {
        identity: String,
        enabled: bool,
    },
    ScreenShareStarted {
        identity: String,
    },
    ScreenShareStopped {
        identity: String,
    },
    ScreenShareDenied {
        holder: String,
    },
    ChatMessage {
        sender: String,
        sender_id: String,
        message: String,
        timestamp: i64,
        direct: bool,
    },
    ActionDenied {
        action: String,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_join_request() {
        // テスト項目: join-request は username を省略できる
        // given (前提条件):
        let with_name = r#"{"type":"join-request","roomKey":"abc","username":"Alice"}"#;
        let without_name = r#"{"type":"join-request","roomKey":"abc"}"#;

        // when (操作):
        let with_name: ClientMessage = serde_json::from_str(with_name).unwrap();
        let without_name: ClientMessage = serde_json::from_str(without_name).unwrap();

        // then (期待する結果):
        assert_eq!(
            with_name,
            ClientMessage::JoinRequest {
                room_key: "abc".to_string(),
                username: Some("Alice".to_string()),
            }
        );
        assert_eq!(
            without_name,
            ClientMessage::JoinRequest {
                room_key: "abc".to_string(),
                username: None,
            }
        );
    }

    #[test]
    fn test_parse_unit_and_opaque_frames() {
        // テスト項目: フィールドなしのフレームと不透明な signal ペイロードを読める
        // given (前提条件):
        let share = r#"{"type":"request-screen-share"}"#;
        let signal = r#"{"type":"signal","to":"b","payload":{"sdp":"v=0","kind":"offer"}}"#;

        // when (操作):
        let share: ClientMessage = serde_json::from_str(share).unwrap();
        let signal: ClientMessage = serde_json::from_str(signal).unwrap();

        // then (期待する結果):
        assert_eq!(share, ClientMessage::RequestScreenShare);
        assert_eq!(
            signal,
            ClientMessage::Signal {
                to: "b".to_string(),
                payload: json!({"sdp": "v=0", "kind": "offer"}),
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        // テスト項目: 未知の type や必須フィールド欠落はパースエラー
        // given (前提条件):
        let inputs = [
            r#"{"type":"teleport"}"#,
            r#"{"type":"admit-user","identity":"x"}"#,
            r#"not json"#,
        ];

        for input in inputs {
            // when (操作):
            let result = serde_json::from_str::<ClientMessage>(input);

            // then (期待する結果):
            assert!(result.is_err(), "input: {input}");
        }
    }

    #[test]
    fn test_server_message_wire_format() {
        // テスト項目: サーバーメッセージは kebab-case の type と camelCase のフィールドで出力される
        // given (前提条件):
        let message = ServerMessage::ChatMessage {
            sender: "Alice".to_string(),
            sender_id: "a-1".to_string(),
            message: "hi".to_string(),
            timestamp: 42,
            direct: false,
        };

        // when (操作):
        let value = serde_json::to_value(&message).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "chat-message",
                "sender": "Alice",
                "senderId": "a-1",
                "message": "hi",
                "timestamp": 42,
                "direct": false,
            })
        );

        let joined = ServerMessage::RoomJoined {
            room_key: "abc".to_string(),
            is_host: true,
            username: "Alice".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&joined).unwrap(),
            json!({"type": "room-joined", "roomKey": "abc", "isHost": true, "username": "Alice"})
        );
    }
}
