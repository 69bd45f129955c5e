//! Token strategy trait

use chrono::Duration;

#[cfg(test)]
use mockall::automock;

use super::claims::Claims;
use crate::domain::DomainError;

/// Signing and verification algorithm behind the token service
#[cfg_attr(test, automock)]
pub trait TokenStrategy: Send + Sync {
    /// Sign `claims` plus an `exp` of now + `ttl` (or the strategy's default)
    fn create_token(&self, claims: &Claims, ttl: Option<Duration>) -> Result<String, DomainError>;

    /// Decode a token, checking signature and expiry
    ///
    /// Every failure is reported as `InvalidToken`.
    fn verify_token(&self, token: &str) -> Result<Claims, DomainError>;

    /// TTL applied when a caller does not pass one
    fn default_ttl(&self) -> Duration;
}
