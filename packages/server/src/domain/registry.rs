//! Connection registry: identity → display name and join time.

use std::collections::HashMap;

use super::{
    entity::Connection,
    error::SessionError,
    value_object::{ConnectionId, DisplayName, Timestamp},
};

#[derive(Debug, Clone)]
struct Registration {
    /// Registration order, used to break ties between equal display names.
    seq: u64,
    connection: Connection,
}

/// Owns every live [`Connection`] record. Other components refer to
/// connections only by [`ConnectionId`].
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    entries: HashMap<ConnectionId, Registration>,
    next_seq: u64,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection with the default display name.
    /// Returns `false` if the identity was already registered.
    pub fn register(&mut self, id: ConnectionId, joined_at: Timestamp) -> bool {
        if self.entries.contains_key(&id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            id.clone(),
            Registration {
                seq,
                connection: Connection::new(id, joined_at),
            },
        );
        true
    }

    pub fn set_name(&mut self, id: &ConnectionId, name: DisplayName) -> Result<(), SessionError> {
        let registration = self
            .entries
            .get_mut(id)
            .ok_or_else(|| SessionError::ConnectionNotFound(id.to_string()))?;
        registration.connection.display_name = name;
        Ok(())
    }

    pub fn lookup(&self, id: &ConnectionId) -> Result<&DisplayName, SessionError> {
        self.entries
            .get(id)
            .map(|registration| &registration.connection.display_name)
            .ok_or_else(|| SessionError::ConnectionNotFound(id.to_string()))
    }

    /// Display name for `id`, or "Guest" when it is unknown.
    pub fn display_name_or_guest(&self, id: &ConnectionId) -> DisplayName {
        self.lookup(id).cloned().unwrap_or_default()
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Connection> {
        self.entries.get(id).map(|registration| &registration.connection)
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn remove(&mut self, id: &ConnectionId) -> Option<Connection> {
        self.entries
            .remove(id)
            .map(|registration| registration.connection)
    }

    /// Resolve the target of `@name rest` from the text after the `@`.
    ///
    /// The longest registered display name that `text` starts with and that is
    /// followed by whitespace wins, so names containing spaces can be
    /// mentioned. Equal names go to the earliest registration. Returns the
    /// target and the text after the name.
    pub fn match_mention<'t>(&self, text: &'t str) -> Option<(ConnectionId, &'t str)> {
        self.entries
            .values()
            .filter_map(|registration| {
                let rest = text.strip_prefix(registration.connection.display_name.as_str())?;
                rest.starts_with(char::is_whitespace)
                    .then_some((registration, rest))
            })
            .max_by(|(a, _), (b, _)| {
                let a_len = a.connection.display_name.as_str().len();
                let b_len = b.connection.display_name.as_str().len();
                a_len.cmp(&b_len).then(b.seq.cmp(&a.seq))
            })
            .map(|(registration, rest)| (registration.connection.id.clone(), rest))
    }

    /// Every registered identity except `exclude`, in registration order.
    pub fn ids_except(&self, exclude: &ConnectionId) -> Vec<ConnectionId> {
        let mut registrations: Vec<&Registration> = self
            .entries
            .values()
            .filter(|registration| &registration.connection.id != exclude)
            .collect();
        registrations.sort_by_key(|registration| registration.seq);
        registrations
            .into_iter()
            .map(|registration| registration.connection.id.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn name(value: &str) -> DisplayName {
        DisplayName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_register_uses_guest_name() {
        // テスト項目: 登録直後の表示名は "Guest"
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();

        // when (操作):
        let registered = registry.register(id("c1"), Timestamp::new(100));

        // then (期待する結果):
        assert!(registered);
        assert_eq!(registry.lookup(&id("c1")).unwrap().as_str(), "Guest");
        assert_eq!(registry.get(&id("c1")).unwrap().joined_at, Timestamp::new(100));
    }

    #[test]
    fn test_register_twice_keeps_original_record() {
        // テスト項目: 同じ ID の二重登録は拒否され、既存の記録は保たれる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        registry.register(id("c1"), Timestamp::new(100));
        registry.set_name(&id("c1"), name("alice")).unwrap();

        // when (操作):
        let registered = registry.register(id("c1"), Timestamp::new(200));

        // then (期待する結果):
        assert!(!registered);
        assert_eq!(registry.lookup(&id("c1")).unwrap().as_str(), "alice");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_unknown_connection() {
        // テスト項目: 未登録の接続の参照は NotFound になり、"Guest" として扱える
        // given (前提条件):
        let registry = ConnectionRegistry::new();

        // when (操作):
        let result = registry.lookup(&id("ghost"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SessionError::ConnectionNotFound("ghost".to_string()))
        );
        assert_eq!(registry.display_name_or_guest(&id("ghost")).as_str(), "Guest");
    }

    #[test]
    fn test_set_name_unknown_connection() {
        // テスト項目: 未登録の接続に名前を設定するとエラーになる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();

        // when (操作):
        let result = registry.set_name(&id("ghost"), name("alice"));

        // then (期待する結果):
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_match_mention_first_registration_wins() {
        // テスト項目: 同名の接続が複数ある場合、先に登録された接続が選ばれる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        for (conn, display) in [("c1", "bob"), ("c2", "alice"), ("c3", "alice")] {
            registry.register(id(conn), Timestamp::new(0));
            registry.set_name(&id(conn), name(display)).unwrap();
        }

        // when (操作):
        let found = registry.match_mention("alice hi");

        // then (期待する結果):
        assert_eq!(found, Some((id("c2"), " hi")));
    }

    #[test]
    fn test_match_mention_prefers_longest_name() {
        // テスト項目: 前方一致する表示名が複数ある場合、最も長い名前が選ばれる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        for (conn, display) in [("c1", "Alice"), ("c2", "Alice Smith"), ("c3", "Ali")] {
            registry.register(id(conn), Timestamp::new(0));
            registry.set_name(&id(conn), name(display)).unwrap();
        }

        // when (操作):
        let smith = registry.match_mention("Alice Smith hi");
        let alice = registry.match_mention("Alice Smithers hi");

        // then (期待する結果): 名前の直後が空白でない一致は採用されない
        assert_eq!(smith, Some((id("c2"), " hi")));
        assert_eq!(alice, Some((id("c1"), " Smithers hi")));
    }

    #[test]
    fn test_match_mention_is_case_sensitive() {
        // テスト項目: 表示名の照合は大文字小文字を区別する
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        registry.register(id("c1"), Timestamp::new(0));
        registry.set_name(&id("c1"), name("Alice")).unwrap();

        // when (操作):
        let found = registry.match_mention("alice hi");

        // then (期待する結果):
        assert_eq!(found, None);
    }

    #[test]
    fn test_ids_except_in_registration_order() {
        // テスト項目: 指定した接続以外の ID が登録順に返される
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        for conn in ["c3", "c1", "c2"] {
            registry.register(id(conn), Timestamp::new(0));
        }

        // when (操作):
        let ids = registry.ids_except(&id("c1"));

        // then (期待する結果):
        assert_eq!(ids, vec![id("c3"), id("c2")]);
    }

    #[test]
    fn test_remove_connection() {
        // テスト項目: 削除した接続は参照できなくなる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        registry.register(id("c1"), Timestamp::new(0));

        // when (操作):
        let removed = registry.remove(&id("c1"));

        // then (期待する結果):
        assert!(removed.is_some());
        assert!(!registry.contains(&id("c1")));
        assert!(registry.is_empty());
        assert!(registry.remove(&id("c1")).is_none());
    }
}
