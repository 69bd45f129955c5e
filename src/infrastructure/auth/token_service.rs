//! Token service wrapping a token strategy

use std::sync::Arc;

use chrono::Duration;
use tracing::instrument;

use crate::domain::token::{Claims, TokenStrategy};
use crate::domain::DomainError;

/// Issues and verifies access tokens through the configured [`TokenStrategy`]
#[derive(Clone)]
pub struct TokenService {
    strategy: Arc<dyn TokenStrategy>,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("default_ttl", &self.strategy.default_ttl())
            .finish()
    }
}

impl TokenService {
    pub fn new(strategy: Arc<dyn TokenStrategy>) -> Self {
        Self { strategy }
    }

    pub fn create_access_token(
        &self,
        claims: &Claims,
        ttl: Option<Duration>,
    ) -> Result<String, DomainError> {
        self.strategy.create_token(claims, ttl)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.strategy.verify_token(token)
    }

    /// Token whose only claim besides `exp` is `sub = username`
    #[instrument(skip(self))]
    pub fn create_user_token(
        &self,
        username: &str,
        ttl: Option<Duration>,
    ) -> Result<String, DomainError> {
        let claims = Claims::for_subject(username);
        self.create_access_token(&claims, ttl)
    }

    /// Verify `token` and return its `sub` claim
    pub fn username_from_token(&self, token: &str) -> Result<String, DomainError> {
        let claims = self.verify_token(token)?;

        claims
            .subject()
            .map(str::to_string)
            .ok_or_else(|| DomainError::invalid_token("Token has no subject"))
    }

    pub fn default_ttl(&self) -> Duration {
        self.strategy.default_ttl()
    }
}
