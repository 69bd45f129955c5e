//! In-memory credential repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Settings;
use crate::domain::auth::CredentialRepository;
use crate::domain::DomainError;

/// Username -> plaintext password map behind an async lock
#[derive(Clone, Default)]
pub struct InMemoryCredentialRepository {
    credentials: Arc<RwLock<HashMap<String, String>>>,
}

impl std::fmt::Debug for InMemoryCredentialRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCredentialRepository")
            .field("credentials", &"[hidden]")
            .finish()
    }
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: HashMap<String, String>) -> Self {
        Self {
            credentials: Arc::new(RwLock::new(credentials)),
        }
    }

    /// Repository seeded with the configured test user
    pub fn from_settings(settings: &Settings) -> Self {
        let mut credentials = HashMap::new();
        credentials.insert(settings.test_user.clone(), settings.test_password.clone());
        Self::with_credentials(credentials)
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn validate(&self, username: &str, password: &str) -> Result<bool, DomainError> {
        let credentials = self.credentials.read().await;
        Ok(credentials
            .get(username)
            .is_some_and(|stored| stored == password))
    }

    async fn get_all(&self) -> Result<HashMap<String, String>, DomainError> {
        let credentials = self.credentials.read().await;
        Ok(credentials.clone())
    }

    async fn add(&self, username: &str, password: &str) -> Result<(), DomainError> {
        let mut credentials = self.credentials.write().await;
        credentials.insert(username.to_string(), password.to_string());
        Ok(())
    }

    async fn remove(&self, username: &str) -> Result<bool, DomainError> {
        let mut credentials = self.credentials.write().await;
        Ok(credentials.remove(username).is_some())
    }
}
