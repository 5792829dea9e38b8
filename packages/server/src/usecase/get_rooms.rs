//! UseCase: ルーム一覧の取得

use std::sync::Arc;

use crate::domain::{Room, SessionRepository};

pub struct GetRoomsUseCase {
    repository: Arc<dyn SessionRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// 作成順のルーム一覧
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::*;

    #[tokio::test]
    async fn test_get_rooms() {
        // テスト項目: 存在するルームがすべて返される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = GetRoomsUseCase::new(repository.clone());
        setup_room(&repository, "daily", "alice", &["bob"]).await;
        setup_room(&repository, "weekly", "carol", &[]).await;

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        let keys: Vec<&str> = rooms.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["daily", "weekly"]);
        assert_eq!(rooms[0].members.len(), 2);
    }
}
