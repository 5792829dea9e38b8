//! Room directory: room key → membership, host and waiting queue.

use std::collections::HashMap;

use super::{
    entity::{Room, WaitingEntry},
    error::SessionError,
    value_object::{ConnectionId, RoomKey, Timestamp},
};

/// Outcome of [`RoomDirectory::remove_member`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomRemoval {
    /// Whether the identity was a member at all.
    pub removed: bool,
    /// The room became empty and was deleted.
    pub room_deleted: bool,
    /// Host elected because the departing member was host.
    pub new_host: Option<ConnectionId>,
    /// The departing member held the room's screen-share lock.
    pub share_released: bool,
    /// Members left in the room, in join order.
    pub remaining: Vec<ConnectionId>,
    /// Waiting entries discarded together with a deleted room.
    pub orphaned_waiting: Vec<WaitingEntry>,
}

/// Owns every [`Room`]. A room exists here iff it has at least one member,
/// except transiently between [`RoomDirectory::ensure_room`] and the first
/// [`RoomDirectory::add_member`].
#[derive(Debug, Default)]
pub struct RoomDirectory {
    rooms: HashMap<RoomKey, Room>,
}

impl RoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing room or create an empty one.
    pub fn ensure_room(&mut self, key: &RoomKey, now: Timestamp) -> &mut Room {
        self.rooms
            .entry(key.clone())
            .or_insert_with(|| Room::new(key.clone(), now))
    }

    pub fn get(&self, key: &RoomKey) -> Option<&Room> {
        self.rooms.get(key)
    }

    pub fn get_mut(&mut self, key: &RoomKey) -> Option<&mut Room> {
        self.rooms.get_mut(key)
    }

    /// Append `id` to the members unless already present.
    /// Returns whether the member list changed.
    pub fn add_member(&mut self, key: &RoomKey, id: ConnectionId) -> Result<bool, SessionError> {
        let room = self
            .rooms
            .get_mut(key)
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?;
        Ok(room.add_member(id))
    }

    /// Remove `id` from the room, electing a new host and deleting the room
    /// when it becomes empty. Unknown rooms and non-members are a no-op.
    pub fn remove_member(&mut self, key: &RoomKey, id: &ConnectionId) -> RoomRemoval {
        let Some(room) = self.rooms.get_mut(key) else {
            return RoomRemoval::default();
        };

        let removal = room.remove_member(id);
        if !removal.removed {
            return RoomRemoval::default();
        }

        if room.is_empty() {
            let orphaned_waiting = self
                .rooms
                .remove(key)
                .map(|room| room.waiting)
                .unwrap_or_default();
            return RoomRemoval {
                removed: true,
                room_deleted: true,
                new_host: None,
                share_released: removal.share_released,
                remaining: Vec::new(),
                orphaned_waiting,
            };
        }

        RoomRemoval {
            removed: true,
            room_deleted: false,
            new_host: removal.new_host,
            share_released: removal.share_released,
            remaining: room.members.clone(),
            orphaned_waiting: Vec::new(),
        }
    }

    pub fn set_host(&mut self, key: &RoomKey, id: &ConnectionId) -> Result<(), SessionError> {
        self.rooms
            .get_mut(key)
            .ok_or_else(|| SessionError::RoomNotFound(key.to_string()))?
            .set_host(id)
    }

    pub fn get_host(&self, key: &RoomKey) -> Option<&ConnectionId> {
        self.rooms.get(key).and_then(|room| room.host.as_ref())
    }

    /// The room `id` is an admitted member of, if any.
    pub fn room_of_member(&self, id: &ConnectionId) -> Option<&RoomKey> {
        self.rooms
            .values()
            .find(|room| room.is_member(id))
            .map(|room| &room.key)
    }

    /// The room `id` is waiting to enter, if any.
    pub fn room_of_waiting(&self, id: &ConnectionId) -> Option<&RoomKey> {
        self.rooms
            .values()
            .find(|room| room.is_waiting(id))
            .map(|room| &room.key)
    }

    /// Drop every waiting entry of `id` across all rooms.
    pub fn prune_waiting(&mut self, id: &ConnectionId) -> Vec<(RoomKey, WaitingEntry)> {
        self.rooms
            .values_mut()
            .filter_map(|room| {
                room.take_waiting(id)
                    .map(|entry| (room.key.clone(), entry))
            })
            .collect()
    }

    /// All rooms ordered by creation time, then key.
    pub fn snapshot(&self) -> Vec<Room> {
        let mut rooms: Vec<Room> = self.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.key.cmp(&b.key))
        });
        rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::DisplayName;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn key(value: &str) -> RoomKey {
        RoomKey::new(value.to_string()).unwrap()
    }

    fn directory_with(room: &str, members: &[&str]) -> RoomDirectory {
        let mut directory = RoomDirectory::new();
        directory.ensure_room(&key(room), Timestamp::new(0));
        for member in members {
            directory.add_member(&key(room), id(member)).unwrap();
        }
        if let Some(first) = members.first() {
            directory.set_host(&key(room), &id(first)).unwrap();
        }
        directory
    }

    #[test]
    fn test_ensure_room_returns_existing_room() {
        // テスト項目: 既存のルームキーでは新しいルームを作らない
        // given (前提条件):
        let mut directory = directory_with("r1", &["alice"]);

        // when (操作):
        let room = directory.ensure_room(&key("r1"), Timestamp::new(999));

        // then (期待する結果):
        assert_eq!(room.members, vec![id("alice")]);
        assert_eq!(room.created_at, Timestamp::new(0));
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_ensure_room_creates_empty_room() {
        // テスト項目: 未知のルームキーでは空のルームが作られる
        // given (前提条件):
        let mut directory = RoomDirectory::new();

        // when (操作):
        let room = directory.ensure_room(&key("r1"), Timestamp::new(5));

        // then (期待する結果):
        assert!(room.members.is_empty());
        assert_eq!(room.host, None);
        assert!(room.waiting.is_empty());
    }

    #[test]
    fn test_add_member_to_unknown_room() {
        // テスト項目: 存在しないルームへのメンバー追加は RoomNotFound
        // given (前提条件):
        let mut directory = RoomDirectory::new();

        // when (操作):
        let result = directory.add_member(&key("nowhere"), id("alice"));

        // then (期待する結果):
        assert_eq!(result, Err(SessionError::RoomNotFound("nowhere".to_string())));
    }

    #[test]
    fn test_remove_host_migrates_to_next_member() {
        // テスト項目: ホストが抜けると次のメンバーがホストになり、ルームは残る
        // given (前提条件):
        let mut directory = directory_with("r1", &["alice", "bob"]);

        // when (操作):
        let removal = directory.remove_member(&key("r1"), &id("alice"));

        // then (期待する結果):
        assert!(removal.removed);
        assert!(!removal.room_deleted);
        assert_eq!(removal.new_host, Some(id("bob")));
        assert_eq!(removal.remaining, vec![id("bob")]);
        assert_eq!(directory.get_host(&key("r1")), Some(&id("bob")));
    }

    #[test]
    fn test_remove_last_member_deletes_room_and_queue() {
        // テスト項目: 最後のメンバーが抜けるとルームと入室待ちが削除される
        // given (前提条件):
        let mut directory = directory_with("r1", &["alice"]);
        let entry = WaitingEntry {
            connection_id: id("bob"),
            display_name: DisplayName::new("bob".to_string()).unwrap(),
            requested_at: Timestamp::new(1),
        };
        directory.get_mut(&key("r1")).unwrap().enqueue(entry.clone());

        // when (操作):
        let removal = directory.remove_member(&key("r1"), &id("alice"));

        // then (期待する結果):
        assert!(removal.room_deleted);
        assert_eq!(removal.orphaned_waiting, vec![entry]);
        assert!(directory.get(&key("r1")).is_none());
        assert_eq!(directory.get_host(&key("r1")), None);
        assert!(directory.is_empty());
    }

    #[test]
    fn test_remove_unknown_member_is_noop() {
        // テスト項目: 存在しないメンバー・ルームの削除は何もしない
        // given (前提条件):
        let mut directory = directory_with("r1", &["alice"]);

        // when (操作):
        let removal1 = directory.remove_member(&key("r1"), &id("ghost"));
        let removal2 = directory.remove_member(&key("nowhere"), &id("alice"));

        // then (期待する結果):
        assert_eq!(removal1, RoomRemoval::default());
        assert_eq!(removal2, RoomRemoval::default());
        assert_eq!(directory.get(&key("r1")).unwrap().members, vec![id("alice")]);
    }

    #[test]
    fn test_room_lookup_by_member_and_waiter() {
        // テスト項目: メンバー・入室待ちの接続から所属ルームを引ける
        // given (前提条件):
        let mut directory = directory_with("r1", &["alice"]);
        directory.get_mut(&key("r1")).unwrap().enqueue(WaitingEntry {
            connection_id: id("bob"),
            display_name: DisplayName::guest(),
            requested_at: Timestamp::new(1),
        });

        // when (操作):
        let member_room = directory.room_of_member(&id("alice")).cloned();
        let waiting_room = directory.room_of_waiting(&id("bob")).cloned();

        // then (期待する結果):
        assert_eq!(member_room, Some(key("r1")));
        assert_eq!(waiting_room, Some(key("r1")));
        assert_eq!(directory.room_of_member(&id("bob")), None);
    }

    #[test]
    fn test_prune_waiting_removes_entries() {
        // テスト項目: 切断した接続の入室待ちは全て取り除かれる
        // given (前提条件):
        let mut directory = directory_with("r1", &["alice"]);
        directory.get_mut(&key("r1")).unwrap().enqueue(WaitingEntry {
            connection_id: id("bob"),
            display_name: DisplayName::guest(),
            requested_at: Timestamp::new(1),
        });

        // when (操作):
        let pruned = directory.prune_waiting(&id("bob"));

        // then (期待する結果):
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].0, key("r1"));
        assert!(directory.get(&key("r1")).unwrap().waiting.is_empty());
    }

    #[test]
    fn test_snapshot_orders_by_creation() {
        // テスト項目: スナップショットは作成順に並ぶ
        // given (前提条件):
        let mut directory = RoomDirectory::new();
        directory.ensure_room(&key("late"), Timestamp::new(20));
        directory.ensure_room(&key("early"), Timestamp::new(10));

        // when (操作):
        let rooms = directory.snapshot();

        // then (期待する結果):
        let keys: Vec<&str> = rooms.iter().map(|room| room.key.as_str()).collect();
        assert_eq!(keys, vec!["early", "late"]);
    }
}
