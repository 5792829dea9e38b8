//! Results of coordinator state transitions.
//!
//! Each transition reports who is affected so the use-case layer can turn it
//! into notifications without re-reading state.

use super::{
    entity::{ChatMessage, Connection, Participant, Room, WaitingEntry},
    value_object::{ConnectionId, RoomKey},
};

/// Result of a join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// The room was empty: the requester is admitted immediately as host.
    Founded { room: RoomKey, host: Participant },
    /// The requester is already a member of this room.
    AlreadyMember {
        room: RoomKey,
        participant: Participant,
        is_host: bool,
    },
    /// The requester waits for the host's decision.
    Queued {
        room: RoomKey,
        host: ConnectionId,
        entry: WaitingEntry,
        /// `false` when the same request was already pending.
        newly_queued: bool,
    },
}

/// A waiting request accepted by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub room: RoomKey,
    pub admitted: Participant,
    /// Full roster after admission, in join order.
    pub members: Vec<Participant>,
    pub screen_sharer: Option<ConnectionId>,
}

/// A waiting request declined by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub room: RoomKey,
    pub requester: ConnectionId,
}

/// A member leaving a room, by eviction or disconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub room: RoomKey,
    pub departed: ConnectionId,
    /// Members still in the room, in join order.
    pub remaining: Vec<ConnectionId>,
    pub new_host: Option<Participant>,
    /// The departed member held the screen-share lock.
    pub share_stopped: bool,
    /// Requests still waiting; re-sent to a newly elected host.
    pub pending_requests: Vec<WaitingEntry>,
    /// Requests dropped because the room was deleted.
    pub orphaned_requests: Vec<WaitingEntry>,
    pub room_deleted: bool,
}

/// A pending request withdrawn because its requester disconnected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawnRequest {
    pub room: RoomKey,
    pub host: Option<ConnectionId>,
    pub requester: ConnectionId,
}

/// Everything that happened when a connection closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedConnection {
    pub connection: Option<Connection>,
    pub online_millis: i64,
    pub departure: Option<Departure>,
    pub withdrawn_requests: Vec<WithdrawnRequest>,
}

/// A granted screen-share request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareStarted {
    pub room: RoomKey,
    pub holder: ConnectionId,
    /// Every member of the room, the holder included.
    pub audience: Vec<ConnectionId>,
    pub reentered: bool,
}

/// A released screen-share lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareStopped {
    pub room: RoomKey,
    pub holder: ConnectionId,
    pub audience: Vec<ConnectionId>,
}

/// Who receives a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatDelivery {
    pub message: ChatMessage,
    pub recipients: Vec<ConnectionId>,
    /// Delivered through an `@name` mention rather than a broadcast.
    pub direct: bool,
}

/// Room plus the registry records of its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDetail {
    pub room: Room,
    pub members: Vec<Connection>,
}
