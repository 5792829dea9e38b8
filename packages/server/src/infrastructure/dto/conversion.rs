//! Conversion logic between DTOs and domain types.

use kaigi_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    Command, ConnectionId, DisplayName, MessageContent, Notification, Participant, Room,
    RoomDetail, RoomKey, SignalPayload, ValueObjectError,
};
use crate::infrastructure::dto::{
    http::{MemberDetailDto, RoomDetailDto, RoomSummaryDto, WaitingDetailDto},
    websocket::{ClientMessage, MemberInfo, ServerMessage},
};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ClientMessage> for Command {
    type Error = ValueObjectError;

    fn try_from(dto: ClientMessage) -> Result<Self, Self::Error> {
        Ok(match dto {
            ClientMessage::JoinRequest { room_key, username } => Self::Join {
                room: RoomKey::new(room_key)?,
                display_name: username
                    .map(DisplayName::new)
                    .transpose()?
                    .unwrap_or_default(),
            },
            ClientMessage::AdmitUser { identity, room_key } => Self::Admit {
                room: RoomKey::new(room_key)?,
                requester: ConnectionId::new(identity)?,
            },
            ClientMessage::RejectUser { identity, room_key } => Self::Reject {
                room: RoomKey::new(room_key)?,
                requester: ConnectionId::new(identity)?,
            },
            ClientMessage::KickUser { identity } => Self::Kick {
                target: ConnectionId::new(identity)?,
            },
            ClientMessage::Signal { to, payload } => Self::Signal {
                to: ConnectionId::new(to)?,
                payload: SignalPayload::new(payload),
            },
            ClientMessage::VideoToggle { enabled } => Self::ToggleVideo { enabled },
            ClientMessage::RequestScreenShare => Self::StartScreenShare,
            ClientMessage::StopScreenShare => Self::StopScreenShare,
            ClientMessage::ChatMessage { message } => Self::Chat {
                content: MessageContent::new(message)?,
            },
        })
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Participant> for MemberInfo {
    fn from(model: Participant) -> Self {
        Self {
            identity: model.id.into_string(),
            username: model.display_name.into_string(),
        }
    }
}

impl From<Notification> for ServerMessage {
    fn from(model: Notification) -> Self {
        match model {
            Notification::Connected { identity } => Self::Connected {
                identity: identity.into_string(),
            },
            Notification::RoomJoined {
                room,
                is_host,
                display_name,
            } => Self::RoomJoined {
                room_key: room.into_string(),
                is_host,
                username: display_name.into_string(),
            },
            Notification::WaitForHost { room } => Self::WaitForHost {
                room_key: room.into_string(),
            },
            Notification::UserRequestedJoin { room, requester } => Self::UserRequestedJoin {
                room_key: room.into_string(),
                identity: requester.id.into_string(),
                username: requester.display_name.into_string(),
            },
            Notification::JoinRequestWithdrawn { room, identity } => Self::JoinRequestWithdrawn {
                room_key: room.into_string(),
                identity: identity.into_string(),
            },
            Notification::JoinRejected { room } => Self::JoinRejected {
                room_key: room.into_string(),
            },
            Notification::Kicked { room } => Self::Kicked {
                room_key: room.into_string(),
            },
            Notification::UserJoined { joined, members } => Self::UserJoined {
                identity: joined.id.into_string(),
                username: joined.display_name.into_string(),
                members: members.into_iter().map(MemberInfo::from).collect(),
            },
            Notification::UserLeft { identity } => Self::UserLeft {
                identity: identity.into_string(),
            },
            Notification::HostChanged { host } => Self::HostChanged {
                identity: host.id.into_string(),
                username: host.display_name.into_string(),
            },
            Notification::Signal { from, payload } => Self::Signal {
                from: from.into_string(),
                payload: payload.into_value(),
            },
            Notification::VideoToggle { identity, enabled } => Self::VideoToggle {
                identity: identity.into_string(),
                enabled,
            },
            Notification::ScreenShareStarted { holder } => Self::ScreenShareStarted {
                identity: holder.into_string(),
            },
            Notification::ScreenShareStopped { holder } => Self::ScreenShareStopped {
                identity: holder.into_string(),
            },
            Notification::ScreenShareDenied { holder } => Self::ScreenShareDenied {
                holder: holder.into_string(),
            },
            Notification::Chat { message, direct } => Self::ChatMessage {
                sender: message.sender_name.into_string(),
                sender_id: message.from.into_string(),
                message: message.content.into_string(),
                timestamp: message.timestamp.value(),
                direct,
            },
            Notification::ActionDenied { action, reason } => Self::ActionDenied { action, reason },
        }
    }
}

impl From<Room> for RoomSummaryDto {
    fn from(model: Room) -> Self {
        Self {
            key: model.key.into_string(),
            host: model.host.map(ConnectionId::into_string),
            members: model
                .members
                .into_iter()
                .map(ConnectionId::into_string)
                .collect(),
            waiting_count: model.waiting.len(),
            screen_sharer: model.screen_share.holder().map(ToString::to_string),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<RoomDetail> for RoomDetailDto {
    fn from(model: RoomDetail) -> Self {
        let RoomDetail { room, members } = model;
        Self {
            screen_sharer: room.screen_share.holder().map(ToString::to_string),
            message_count: room.messages.len(),
            key: room.key.into_string(),
            host: room.host.map(ConnectionId::into_string),
            members: members
                .into_iter()
                .map(|member| MemberDetailDto {
                    identity: member.id.into_string(),
                    username: member.display_name.into_string(),
                    joined_at: timestamp_to_rfc3339(member.joined_at.value()),
                })
                .collect(),
            waiting: room
                .waiting
                .into_iter()
                .map(|entry| WaitingDetailDto {
                    identity: entry.connection_id.into_string(),
                    username: entry.display_name.into_string(),
                    requested_at: timestamp_to_rfc3339(entry.requested_at.value()),
                })
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}
