//! JWT token signing and verification with a shared HMAC secret

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::fmt::Debug;

use crate::config::{Settings, TokenAlgorithm};
use crate::domain::token::{Claims, TokenStrategy};
use crate::domain::DomainError;

/// Configuration for the JWT strategy
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    pub algorithm: TokenAlgorithm,
    /// Lifetime applied when the caller does not pass one
    pub default_ttl: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, algorithm: TokenAlgorithm, default_ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            algorithm,
            default_ttl,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.secret_key.clone(),
            settings.algorithm,
            settings.token_ttl(),
        )
    }
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

/// HMAC JWT implementation of [`TokenStrategy`]
#[derive(Clone)]
pub struct JwtTokenStrategy {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtTokenStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtTokenStrategy")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtTokenStrategy {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(self.config.algorithm.as_jwt());
        validation.leeway = 0;
        validation.validate_aud = false;
        validation
    }
}

impl TokenStrategy for JwtTokenStrategy {
    fn create_token(&self, claims: &Claims, ttl: Option<Duration>) -> Result<String, DomainError> {
        let ttl = ttl.unwrap_or(self.config.default_ttl);

        let expires_at = Utc::now().checked_add_signed(ttl).ok_or_else(|| {
            DomainError::internal(format!("Token lifetime out of range: {}", ttl))
        })?;

        let mut claims = claims.clone();
        claims.set_expiry(expires_at);

        let header = Header::new(self.config.algorithm.as_jwt());
        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))
    }

    fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| DomainError::invalid_token(e.to_string()))?;

        // jsonwebtoken accepts exp == now; expiry starts at exp
        if token_data.claims.is_expired() {
            return Err(DomainError::invalid_token("ExpiredSignature"));
        }

        Ok(token_data.claims)
    }

    fn default_ttl(&self) -> Duration {
        self.config.default_ttl
    }
}
