//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Records are keyed by username; ids are a secondary, scanned attribute.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by their username
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Get a user by their numeric ID
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users, ordered by ID
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count stored users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Store a new user, assigning the next ID
    ///
    /// Fails with `DuplicateUser` when the username is already taken.
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace the record stored under the user's username
    ///
    /// Fails with `UserNotFound` when no record has that username.
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete the user with the given ID, returning whether one was removed
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// Check if a username exists
    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}
