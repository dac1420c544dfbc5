use async_trait::async_trait;
use tokio::sync::Mutex;

use super::model::User;

/// Append-only user storage.
///
/// Ids are assigned as `len + 1`, which only stays unique while nothing is ever removed.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store a new user and return it with its assigned id.
    async fn append(&self, name: String) -> User;
    async fn find(&self, id: u64) -> Option<User>;
    async fn all(&self) -> Vec<User>;
}

/// Store backed by a `Vec`, living as long as the warm Lambda process.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn append(&self, name: String) -> User {
        let mut users = self.users.lock().await;
        let user = User {
            id: users.len() as u64 + 1,
            name: Some(name),
        };
        users.push(user.clone());
        user
    }

    async fn find(&self, id: u64) -> Option<User> {
        self.users
            .lock()
            .await
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    async fn all(&self) -> Vec<User> {
        self.users.lock().await.clone()
    }
}
