//! Client intents after validation.

use super::value_object::{ConnectionId, DisplayName, MessageContent, RoomKey, SignalPayload};

/// A validated request from a connected client.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Join {
        room: RoomKey,
        display_name: DisplayName,
    },
    Admit {
        room: RoomKey,
        requester: ConnectionId,
    },
    Reject {
        room: RoomKey,
        requester: ConnectionId,
    },
    Kick {
        target: ConnectionId,
    },
    Signal {
        to: ConnectionId,
        payload: SignalPayload,
    },
    ToggleVideo {
        enabled: bool,
    },
    StartScreenShare,
    StopScreenShare,
    Chat {
        content: MessageContent,
    },
}
