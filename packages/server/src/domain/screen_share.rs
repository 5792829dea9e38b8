//! Screen-share arbiter: a single optional holder per room.

use serde::Serialize;

use super::{error::SessionError, value_object::ConnectionId};

/// Result of a successful [`ScreenShareLock::acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareGrant {
    /// The lock was free and is now held by the requester.
    Acquired,
    /// The requester already held the lock.
    Reentered,
}

/// Mutual-exclusion flag for screen sharing within one room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScreenShareLock {
    holder: Option<ConnectionId>,
}

impl ScreenShareLock {
    pub fn holder(&self) -> Option<&ConnectionId> {
        self.holder.as_ref()
    }

    pub fn is_held_by(&self, id: &ConnectionId) -> bool {
        self.holder.as_ref() == Some(id)
    }

    /// Grant the lock when it is free or already held by `id`.
    pub fn acquire(&mut self, id: &ConnectionId) -> Result<ShareGrant, SessionError> {
        match &self.holder {
            None => {
                self.holder = Some(id.clone());
                Ok(ShareGrant::Acquired)
            }
            Some(holder) if holder == id => Ok(ShareGrant::Reentered),
            Some(holder) => Err(SessionError::AlreadySharing {
                holder: holder.clone(),
            }),
        }
    }

    /// Clear the lock if `id` holds it. Returns whether anything changed.
    pub fn release(&mut self, id: &ConnectionId) -> bool {
        if self.is_held_by(id) {
            self.holder = None;
            true
        } else {
            false
        }
    }
}
