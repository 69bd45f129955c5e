//! Credential repository trait

use std::collections::HashMap;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

/// Store of username -> password pairs checked at login
///
/// Passwords are held and compared in plaintext.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// True iff an entry exists for `username` and its password equals `password`
    async fn validate(&self, username: &str, password: &str) -> Result<bool, DomainError>;

    /// Snapshot of every stored entry
    async fn get_all(&self) -> Result<HashMap<String, String>, DomainError>;

    /// Insert or replace the entry for `username`
    async fn add(&self, username: &str, password: &str) -> Result<(), DomainError>;

    /// Remove the entry for `username`, returning whether one existed
    async fn remove(&self, username: &str) -> Result<bool, DomainError>;
}
