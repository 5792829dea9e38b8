//! The room/session coordinator.
//!
//! [`Coordinator`] exclusively owns the connection registry, the room
//! directory and every room's screen-share lock. Its methods are the only
//! mutation surface; callers get back outcome values describing who must be
//! notified. Methods are synchronous and never block, so a caller that holds
//! the coordinator for one event applies that event atomically.

mod admission;
mod chat;
mod relay;
mod sharing;

use std::sync::Arc;

use kaigi_shared::time::Clock;

pub use chat::parse_mention;

use super::{
    directory::RoomDirectory,
    entity::{Participant, Room},
    outcome::{ClosedConnection, Departure, RoomDetail, WithdrawnRequest},
    registry::ConnectionRegistry,
    value_object::{ConnectionId, RoomKey, Timestamp},
};

pub struct Coordinator {
    registry: ConnectionRegistry,
    directory: RoomDirectory,
    clock: Arc<dyn Clock>,
    chat_history_limit: Option<usize>,
}

impl Coordinator {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            directory: RoomDirectory::new(),
            clock,
            chat_history_limit: None,
        }
    }

    /// Cap each room's chat history; `None` keeps every message.
    pub fn with_chat_history_limit(mut self, limit: Option<usize>) -> Self {
        self.chat_history_limit = limit;
        self
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn directory(&self) -> &RoomDirectory {
        &self.directory
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }

    /// Register a freshly opened connection. Returns its join time.
    pub fn connect(&mut self, id: ConnectionId) -> Timestamp {
        let now = self.now();
        if !self.registry.register(id.clone(), now) {
            tracing::warn!("Connection '{}' was already registered", id);
        }
        self.registry.get(&id).map(|c| c.joined_at).unwrap_or(now)
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.directory.snapshot()
    }

    pub fn room_detail(&self, key: &RoomKey) -> Option<RoomDetail> {
        let room = self.directory.get(key)?.clone();
        let members = room
            .members
            .iter()
            .filter_map(|id| self.registry.get(id).cloned())
            .collect();
        Some(RoomDetail { room, members })
    }

    /// The room `id` is currently admitted to.
    pub fn room_of(&self, id: &ConnectionId) -> Option<&RoomKey> {
        self.directory.room_of_member(id)
    }

    /// Tear down everything a closing connection owns in one step:
    /// pending requests, room membership (with host migration and
    /// screen-share release) and the registry record.
    pub fn close_connection(&mut self, id: &ConnectionId) -> ClosedConnection {
        let withdrawn_requests = self
            .directory
            .prune_waiting(id)
            .into_iter()
            .map(|(room, entry)| WithdrawnRequest {
                host: self.directory.get_host(&room).cloned(),
                room,
                requester: entry.connection_id,
            })
            .collect();

        let departure = self
            .directory
            .room_of_member(id)
            .cloned()
            .map(|key| self.depart(&key, id));

        let now = self.now();
        let connection = self.registry.remove(id);
        let online_millis = connection
            .as_ref()
            .map(|c| now.millis_since(c.joined_at))
            .unwrap_or(0);

        ClosedConnection {
            connection,
            online_millis,
            departure,
            withdrawn_requests,
        }
    }

    /// Remove a member from a room and describe the fallout.
    fn depart(&mut self, key: &RoomKey, id: &ConnectionId) -> Departure {
        let removal = self.directory.remove_member(key, id);
        let new_host = removal
            .new_host
            .as_ref()
            .map(|host| participant_of(&self.registry, host));
        let pending_requests = match (&new_host, self.directory.get(key)) {
            (Some(_), Some(room)) => room.waiting.clone(),
            _ => Vec::new(),
        };

        Departure {
            room: key.clone(),
            departed: id.clone(),
            remaining: removal.remaining,
            new_host,
            share_stopped: removal.share_released,
            pending_requests,
            orphaned_requests: removal.orphaned_waiting,
            room_deleted: removal.room_deleted,
        }
    }
}

fn participant_of(registry: &ConnectionRegistry, id: &ConnectionId) -> Participant {
    Participant {
        id: id.clone(),
        display_name: registry.display_name_or_guest(id),
    }
}
