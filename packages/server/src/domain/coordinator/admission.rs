//! Admission control: host fast path, queued requests, admit / reject / kick.

use super::{Coordinator, participant_of};
use crate::domain::{
    entity::WaitingEntry,
    error::SessionError,
    outcome::{Admission, Departure, JoinOutcome, Rejection},
    value_object::{ConnectionId, DisplayName, RoomKey},
};

impl Coordinator {
    /// Handle a join request.
    ///
    /// The first member of an unknown (or emptied) room becomes its host at
    /// once; anyone else is queued until the host decides. A connection may be
    /// in at most one room, as member or as waiter.
    pub fn request_join(
        &mut self,
        key: RoomKey,
        id: &ConnectionId,
        display_name: DisplayName,
    ) -> Result<JoinOutcome, SessionError> {
        if !self.registry.contains(id) {
            return Err(SessionError::ConnectionNotFound(id.to_string()));
        }
        let current = self
            .directory
            .room_of_member(id)
            .or_else(|| self.directory.room_of_waiting(id));
        if let Some(current) = current
            && current != &key
        {
            return Err(SessionError::AlreadyInAnotherRoom(current.to_string()));
        }

        self.registry.set_name(id, display_name.clone())?;

        let now = self.now();
        let room = self.directory.ensure_room(&key, now);

        if room.is_member(id) {
            return Ok(JoinOutcome::AlreadyMember {
                is_host: room.is_host(id),
                participant: participant_of(&self.registry, id),
                room: key,
            });
        }

        if room.is_empty() {
            room.add_member(id.clone());
            room.set_host(id)?;
            tracing::info!("Room '{}' founded by '{}'", key, id);
            return Ok(JoinOutcome::Founded {
                room: key,
                host: participant_of(&self.registry, id),
            });
        }

        let host = room
            .host
            .clone()
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?;
        let entry = WaitingEntry {
            connection_id: id.clone(),
            display_name,
            requested_at: now,
        };
        let newly_queued = room.enqueue(entry.clone());

        Ok(JoinOutcome::Queued {
            room: key,
            host,
            entry,
            newly_queued,
        })
    }

    /// Admit a waiting requester. Only the room's current host may do this.
    pub fn admit(
        &mut self,
        key: &RoomKey,
        requester: &ConnectionId,
        acting: &ConnectionId,
    ) -> Result<Admission, SessionError> {
        let room = self
            .directory
            .get_mut(key)
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?;
        if !room.is_host(acting) {
            return Err(SessionError::Forbidden("admit participants"));
        }
        room.take_waiting(requester)
            .ok_or_else(|| SessionError::RequestNotFound(requester.to_string()))?;
        room.add_member(requester.clone());

        let members = room
            .members
            .iter()
            .map(|member| participant_of(&self.registry, member))
            .collect();

        Ok(Admission {
            room: key.clone(),
            admitted: participant_of(&self.registry, requester),
            members,
            screen_sharer: room.screen_share.holder().cloned(),
        })
    }

    /// Decline a waiting requester. Only the room's current host may do this.
    pub fn reject(
        &mut self,
        key: &RoomKey,
        requester: &ConnectionId,
        acting: &ConnectionId,
    ) -> Result<Rejection, SessionError> {
        let room = self
            .directory
            .get_mut(key)
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?;
        if !room.is_host(acting) {
            return Err(SessionError::Forbidden("reject participants"));
        }
        room.take_waiting(requester)
            .ok_or_else(|| SessionError::RequestNotFound(requester.to_string()))?;

        Ok(Rejection {
            room: key.clone(),
            requester: requester.clone(),
        })
    }

    /// Evict `target` from the room `acting` hosts.
    pub fn kick(
        &mut self,
        acting: &ConnectionId,
        target: &ConnectionId,
    ) -> Result<Departure, SessionError> {
        if acting == target {
            return Err(SessionError::SelfTarget("kick"));
        }
        let key = self
            .directory
            .room_of_member(acting)
            .cloned()
            .ok_or(SessionError::NotInRoom)?;
        let room = self
            .directory
            .get(&key)
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?;
        if !room.is_host(acting) {
            return Err(SessionError::Forbidden("kick participants"));
        }
        if !room.is_member(target) {
            return Err(SessionError::NotAMember(target.to_string()));
        }

        tracing::info!("'{}' evicted '{}' from room '{}'", acting, target, key);
        Ok(self.depart(&key, target))
    }
}
