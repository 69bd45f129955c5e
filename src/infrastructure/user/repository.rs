//! In-memory user repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Settings;
use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// In-memory implementation of UserRepository, keyed by username
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a repository with initial users, stored as given
    pub fn with_users(users: Vec<User>) -> Self {
        let users_map = users
            .into_iter()
            .map(|user| (user.username().to_string(), user))
            .collect();

        Self {
            users: Arc::new(RwLock::new(users_map)),
        }
    }

    /// Repository seeded with the configured test user as id 1
    pub fn from_settings(settings: &Settings) -> Self {
        let mut user = User::new(&settings.test_user)
            .with_id(1)
            .with_email(format!("{}@example.com", settings.test_user));
        user.set_created_at(Utc::now());

        Self::with_users(vec![user])
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(username).cloned())
    }

    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id() == Some(id)).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;

        let mut result: Vec<User> = users.values().cloned().collect();
        result.sort_by_key(|u| u.id());

        Ok(result)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let users = self.users.read().await;
        Ok(users.len())
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.username()) {
            return Err(DomainError::duplicate_user(user.username()));
        }

        let next_id = users.values().filter_map(User::id).max().unwrap_or(0) + 1;
        user.set_id(next_id);

        if user.created_at().is_none() {
            user.set_created_at(Utc::now());
        }

        users.insert(user.username().to_string(), user.clone());

        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;

        let existing = users
            .get(user.username())
            .ok_or_else(|| DomainError::user_not_found(user.username()))?;

        // Identity fields survive an update that omits them
        if user.id().is_none() {
            if let Some(id) = existing.id() {
                user.set_id(id);
            }
        }
        if user.created_at().is_none() {
            if let Some(created_at) = existing.created_at() {
                user.set_created_at(created_at);
            }
        }

        users.insert(user.username().to_string(), user.clone());

        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;

        let username = users
            .values()
            .find(|u| u.id() == Some(id))
            .map(|u| u.username().to_string());

        match username {
            Some(username) => {
                users.remove(&username);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryUserRepository {
        InMemoryUserRepository::from_settings(&Settings::default())
    }

    #[tokio::test]
    async fn test_seeded_user() {
        let repo = seeded();

        let user = repo.get_by_username("root").await.unwrap().unwrap();
        assert_eq!(user.id(), Some(1));
        assert_eq!(user.email(), Some("root@example.com"));
        assert!(user.is_active());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = seeded();

        let created = repo
            .create(User::new("alice").with_email("alice@example.com"))
            .await
            .unwrap();
        assert_eq!(created.id(), Some(2));
        assert!(created.created_at().is_some());

        let by_name = repo.get_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name, created);

        let by_id = repo.get_by_id(2).await.unwrap().unwrap();
        assert_eq!(by_id.username(), "alice");
    }

    #[tokio::test]
    async fn test_create_assigns_max_plus_one() {
        let repo = InMemoryUserRepository::with_users(vec![User::new("old").with_id(10)]);

        let created = repo.create(User::new("new")).await.unwrap();
        assert_eq!(created.id(), Some(11));
    }

    #[tokio::test]
    async fn test_create_on_empty_store_starts_at_one() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(User::new("first")).await.unwrap();
        assert_eq!(created.id(), Some(1));
    }

    #[tokio::test]
    async fn test_duplicate_username_leaves_store_unchanged() {
        let repo = seeded();

        let result = repo.create(User::new("root").with_email("other@example.com")).await;
        assert!(matches!(result, Err(DomainError::DuplicateUser { .. })));

        assert_eq!(repo.count().await.unwrap(), 1);
        let root = repo.get_by_username("root").await.unwrap().unwrap();
        assert_eq!(root.email(), Some("root@example.com"));
    }

    #[tokio::test]
    async fn test_update() {
        let repo = seeded();

        let mut user = repo.get_by_username("root").await.unwrap().unwrap();
        user.deactivate();
        user.set_email(Some("admin@example.com".to_string()));

        let updated = repo.update(user).await.unwrap();
        assert!(!updated.is_active());

        let stored = repo.get_by_username("root").await.unwrap().unwrap();
        assert!(!stored.is_active());
        assert_eq!(stored.email(), Some("admin@example.com"));
        assert_eq!(stored.id(), Some(1));
    }

    #[tokio::test]
    async fn test_update_keeps_identity_fields() {
        let repo = seeded();

        let updated = repo.update(User::new("root").with_active(false)).await.unwrap();

        assert_eq!(updated.id(), Some(1));
        assert!(updated.created_at().is_some());
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let repo = seeded();

        let result = repo.update(User::new("ghost")).await;
        assert!(matches!(result, Err(DomainError::UserNotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = seeded();
        repo.create(User::new("alice")).await.unwrap();

        assert!(repo.delete(2).await.unwrap());
        assert!(repo.get_by_username("alice").await.unwrap().is_none());
        assert!(repo.get_by_id(2).await.unwrap().is_none());

        assert!(!repo.delete(2).await.unwrap());
        assert!(!repo.delete(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = seeded();
        repo.create(User::new("zed")).await.unwrap();
        repo.create(User::new("amy")).await.unwrap();

        let ids: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|u| u.id())
            .collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[tokio::test]
    async fn test_username_exists() {
        let repo = seeded();

        assert!(repo.username_exists("root").await.unwrap());
        assert!(!repo.username_exists("ghost").await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(User::new(format!("user{}", i))).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id().unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }
}
