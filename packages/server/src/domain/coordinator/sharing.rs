//! Per-room screen-share arbitration.

use super::Coordinator;
use crate::domain::{
    error::SessionError,
    outcome::{ShareStarted, ShareStopped},
    screen_share::ShareGrant,
    value_object::ConnectionId,
};

impl Coordinator {
    /// Try to take the screen-share lock of the requester's room.
    pub fn request_share(&mut self, id: &ConnectionId) -> Result<ShareStarted, SessionError> {
        let key = self
            .directory
            .room_of_member(id)
            .cloned()
            .ok_or(SessionError::NotInRoom)?;
        let room = self
            .directory
            .get_mut(&key)
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?;

        let grant = room.screen_share.acquire(id)?;

        Ok(ShareStarted {
            audience: room.members.clone(),
            room: key,
            holder: id.clone(),
            reentered: grant == ShareGrant::Reentered,
        })
    }

    /// Release the lock if `id` holds it; `Ok(None)` when it does not.
    pub fn stop_share(&mut self, id: &ConnectionId) -> Result<Option<ShareStopped>, SessionError> {
        let key = self
            .directory
            .room_of_member(id)
            .cloned()
            .ok_or(SessionError::NotInRoom)?;
        let room = self
            .directory
            .get_mut(&key)
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?;

        if !room.screen_share.release(id) {
            return Ok(None);
        }

        Ok(Some(ShareStopped {
            audience: room.members.clone(),
            room: key,
            holder: id.clone(),
        }))
    }
}
