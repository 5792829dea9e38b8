//! Signaling relay checks and presence audiences.

use super::{Coordinator, participant_of};
use crate::domain::{
    entity::Participant,
    error::SessionError,
    value_object::{ConnectionId, RoomKey},
};

impl Coordinator {
    /// Check that a signaling payload may travel from `from` to `to`.
    ///
    /// Only admitted members originate signals, and only towards another
    /// connected member of the same room. A waiter therefore cannot signal
    /// before the admission broadcast has gone out.
    pub fn route_signal(&self, from: &ConnectionId, to: &ConnectionId) -> Result<(), SessionError> {
        if from == to {
            return Err(SessionError::SelfTarget("signal"));
        }
        if !self.registry.contains(to) {
            return Err(SessionError::ConnectionNotFound(to.to_string()));
        }
        let key = self
            .directory
            .room_of_member(from)
            .ok_or(SessionError::NotInRoom)?;
        let shares_room = self
            .directory
            .get(key)
            .is_some_and(|room| room.is_member(to));
        if !shares_room {
            return Err(SessionError::NotAMember(to.to_string()));
        }
        Ok(())
    }

    /// Room peers of `from` (everyone in its room except itself).
    pub fn peers_of(&self, from: &ConnectionId) -> Result<(RoomKey, Vec<ConnectionId>), SessionError> {
        let key = self
            .directory
            .room_of_member(from)
            .ok_or(SessionError::NotInRoom)?;
        let peers = self
            .directory
            .get(key)
            .map(|room| room.members_except(from))
            .unwrap_or_default();
        Ok((key.clone(), peers))
    }

    /// Current roster of a room in join order.
    pub fn roster(&self, key: &RoomKey) -> Vec<Participant> {
        self.directory
            .get(key)
            .map(|room| {
                room.members
                    .iter()
                    .map(|member| participant_of(&self.registry, member))
                    .collect()
            })
            .unwrap_or_default()
    }
}
