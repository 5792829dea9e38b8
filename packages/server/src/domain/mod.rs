//! Domain layer: rooms, connections and the coordinator that owns them.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod command;
pub mod coordinator;
pub mod directory;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod notification;
pub mod outcome;
pub mod registry;
pub mod repository;
pub mod screen_share;
pub mod value_object;

pub use command::Command;
pub use coordinator::Coordinator;
pub use entity::{ChatMessage, Connection, Participant, Room, WaitingEntry};
pub use error::{SessionError, ValueObjectError};
pub use message_pusher::{MessagePushError, MessagePusher, PusherChannel};
pub use notification::Notification;
pub use outcome::{
    Admission, ChatDelivery, ClosedConnection, Departure, JoinOutcome, Rejection, RoomDetail,
    ShareStarted, ShareStopped, WithdrawnRequest,
};
pub use repository::SessionRepository;
pub use value_object::{
    ConnectionId, ConnectionIdFactory, DisplayName, MessageContent, RoomKey, SignalPayload,
    Timestamp,
};
