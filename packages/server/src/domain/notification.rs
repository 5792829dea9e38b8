//! Server-to-client notifications in domain terms.
//!
//! The message pusher turns these into wire DTOs; the domain never builds JSON.

use super::{
    entity::{ChatMessage, Participant},
    value_object::{ConnectionId, DisplayName, RoomKey, SignalPayload},
};

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// Tells a fresh connection its own identity.
    Connected { identity: ConnectionId },
    RoomJoined {
        room: RoomKey,
        is_host: bool,
        display_name: DisplayName,
    },
    WaitForHost { room: RoomKey },
    /// Sent to the host only.
    UserRequestedJoin {
        room: RoomKey,
        requester: Participant,
    },
    /// Sent to the host when a waiting requester disconnects.
    JoinRequestWithdrawn {
        room: RoomKey,
        identity: ConnectionId,
    },
    JoinRejected { room: RoomKey },
    Kicked { room: RoomKey },
    UserJoined {
        joined: Participant,
        members: Vec<Participant>,
    },
    UserLeft { identity: ConnectionId },
    HostChanged { host: Participant },
    Signal {
        from: ConnectionId,
        payload: SignalPayload,
    },
    VideoToggle {
        identity: ConnectionId,
        enabled: bool,
    },
    ScreenShareStarted { holder: ConnectionId },
    ScreenShareStopped { holder: ConnectionId },
    ScreenShareDenied { holder: ConnectionId },
    Chat { message: ChatMessage, direct: bool },
    ActionDenied { action: String, reason: String },
}

impl Notification {
    /// Short name used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Connected { .. } => "connected",
            Self::RoomJoined { .. } => "room-joined",
            Self::WaitForHost { .. } => "wait-for-host",
            Self::UserRequestedJoin { .. } => "user-requested-join",
            Self::JoinRequestWithdrawn { .. } => "join-request-withdrawn",
            Self::JoinRejected { .. } => "join-rejected",
            Self::Kicked { .. } => "kicked",
            Self::UserJoined { .. } => "user-joined",
            Self::UserLeft { .. } => "user-left",
            Self::HostChanged { .. } => "host-changed",
            Self::Signal { .. } => "signal",
            Self::VideoToggle { .. } => "video-toggle",
            Self::ScreenShareStarted { .. } => "screen-share-started",
            Self::ScreenShareStopped { .. } => "screen-share-stopped",
            Self::ScreenShareDenied { .. } => "screen-share-denied",
            Self::Chat { .. } => "chat-message",
            Self::ActionDenied { .. } => "action-denied",
        }
    }
}
