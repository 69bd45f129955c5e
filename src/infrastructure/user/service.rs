//! User service for user management

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::user::{User, UserId, UserRepository};
use crate::domain::DomainError;

/// User service, a thin layer over the user store
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Create a new user service
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_username(username).await
    }

    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get_by_id(id).await
    }

    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }

    #[instrument(skip(self, user), fields(username = %user.username()))]
    pub async fn create(&self, user: User) -> Result<User, DomainError> {
        let user = self.repository.create(user).await?;
        info!(user_id = ?user.id(), "User created");
        Ok(user)
    }

    pub async fn update(&self, user: User) -> Result<User, DomainError> {
        self.repository.update(user).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        self.repository.delete(id).await
    }

    /// Mark the user with `id` active
    #[instrument(skip(self))]
    pub async fn activate(&self, id: UserId) -> Result<User, DomainError> {
        let mut user = self.require(id).await?;
        user.activate();
        self.repository.update(user).await
    }

    /// Mark the user with `id` inactive; their tokens stop validating
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: UserId) -> Result<User, DomainError> {
        let mut user = self.require(id).await?;
        user.deactivate();
        self.repository.update(user).await
    }

    async fn require(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::InMemoryUserRepository;

    fn create_service() -> UserService {
        let repository = InMemoryUserRepository::from_settings(&Settings::default());
        UserService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn test_deactivate_and_activate() {
        let service = create_service();

        let user = service.deactivate(1).await.unwrap();
        assert!(!user.is_active());
        assert!(!service.get_by_id(1).await.unwrap().unwrap().is_active());

        let user = service.activate(1).await.unwrap();
        assert!(user.is_active());
        assert!(service.get_by_username("root").await.unwrap().unwrap().is_active());
    }

    #[tokio::test]
    async fn test_activate_missing_user() {
        let service = create_service();

        let result = service.activate(42).await;
        assert!(matches!(result, Err(DomainError::UserNotFound { .. })));

        let result = service.deactivate(42).await;
        assert!(matches!(result, Err(DomainError::UserNotFound { .. })));
    }

    #[tokio::test]
    async fn test_crud_pass_through() {
        let service = create_service();

        let created = service.create(User::new("alice")).await.unwrap();
        assert_eq!(created.id(), Some(2));
        assert_eq!(service.count().await.unwrap(), 2);
        assert_eq!(service.list().await.unwrap().len(), 2);

        assert!(service.delete(2).await.unwrap());
        assert_eq!(service.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let mut repository = MockUserRepository::new();
        repository
            .expect_get_by_id()
            .returning(|_| Err(DomainError::storage("connection lost")));
        repository.expect_update().never();

        let service = UserService::new(Arc::new(repository));

        let result = service.deactivate(1).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
