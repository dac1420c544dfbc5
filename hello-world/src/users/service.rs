use std::sync::Arc;

use crate::error::ValidationError;

use super::model::{NewUser, User};
use super::store::{InMemoryUserStore, UserStore};

/// List, lookup and create operations over a [`UserStore`].
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl Default for UserService {
    fn default() -> Self {
        Self::new(Arc::new(InMemoryUserStore::new()))
    }
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Fixed three-user sample; the first name echoes the requested page.
    ///
    /// Not backed by the store: there is no real pagination yet.
    pub async fn list(&self, page: Option<u32>) -> Vec<User> {
        let page = page.map_or_else(|| "N/A".to_string(), |p| p.to_string());
        vec![
            User {
                id: 1,
                name: Some(format!("User 1 y llego el parametro page: {page}")),
            },
            User {
                id: 2,
                name: Some("User 2".to_string()),
            },
            User {
                id: 3,
                name: Some("User 3".to_string()),
            },
        ]
    }

    pub async fn get_by_id(&self, id: u64) -> Option<User> {
        self.store.find(id).await
    }

    pub async fn create(&self, data: Option<NewUser>) -> Result<User, ValidationError> {
        let data = data.ok_or(ValidationError::MissingData)?;
        let name = data
            .name
            .filter(|name| !name.is_empty())
            .ok_or(ValidationError::MissingName)?;

        let user = self.store.append(name).await;
        tracing::debug!(user_id = user.id, "user created");
        Ok(user)
    }
}
