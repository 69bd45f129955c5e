//! Authentication service: credential checks, token issue and token validation

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::auth::{
    AuthOutcome, CredentialRepository, LoginRequest, RegisterRequest, TokenResponse,
    MSG_INACTIVE_USER, MSG_INVALID_CREDENTIALS, MSG_REGISTERED, MSG_USER_NOT_FOUND,
};
use crate::domain::user::{
    validate_email, validate_password, validate_username, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::TokenService;

/// Orchestrates the credential store, the user store and the token service
#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialRepository>,
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialRepository>,
        users: Arc<dyn UserRepository>,
        tokens: TokenService,
    ) -> Self {
        Self {
            credentials,
            users,
            tokens,
        }
    }

    /// Check a username/password pair and issue a token on success
    ///
    /// Never fails: every problem is reported through the outcome message.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> AuthOutcome {
        match self.try_authenticate(username, password).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Authentication failed unexpectedly");
                AuthOutcome::failure(format!("Authentication error: {}", e))
            }
        }
    }

    async fn try_authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthOutcome, DomainError> {
        if !self.credentials.validate(username, password).await? {
            debug!("Credentials rejected");
            return Ok(AuthOutcome::failure(MSG_INVALID_CREDENTIALS));
        }

        let Some(user) = self.users.get_by_username(username).await? else {
            return Ok(AuthOutcome::failure(MSG_USER_NOT_FOUND));
        };

        if !user.is_active() {
            return Ok(AuthOutcome::failure(MSG_INACTIVE_USER));
        }

        let token = self.tokens.create_user_token(user.username(), None)?;
        info!("User authenticated");

        Ok(AuthOutcome::success(token))
    }

    /// Login flow for the HTTP layer: a failed outcome becomes an error
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, DomainError> {
        let outcome = self.authenticate(&request.user, &request.password).await;

        match outcome.token {
            Some(token) if outcome.success => Ok(TokenResponse::bearer(token, outcome.message)),
            _ => Err(DomainError::authentication(outcome.message)),
        }
    }

    /// Resolve a bearer token to the username of an existing, active user
    ///
    /// Every failure is reported as `InvalidToken`.
    #[instrument(skip(self, token))]
    pub async fn validate_token(&self, token: &str) -> Result<String, DomainError> {
        self.resolve_token(token)
            .await
            .map_err(DomainError::into_invalid_token)
    }

    async fn resolve_token(&self, token: &str) -> Result<String, DomainError> {
        let username = self.tokens.username_from_token(token)?;

        let user = self
            .users
            .get_by_username(&username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&username))?;

        if !user.is_active() {
            return Err(DomainError::inactive_user(&username));
        }

        Ok(username)
    }

    pub async fn get_user_info(&self, username: &str) -> Result<User, DomainError> {
        self.users
            .get_by_username(username)
            .await?
            .ok_or_else(|| DomainError::user_not_found(username))
    }

    /// Create an account with credentials and return it with a fresh token
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<(User, TokenResponse), DomainError> {
        validate_username(&request.username).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;
        if let Some(email) = &request.email {
            validate_email(email).map_err(|e| DomainError::validation(e.to_string()))?;
        }

        if self.users.username_exists(&request.username).await? {
            return Err(DomainError::duplicate_user(&request.username));
        }

        let mut user = User::new(&request.username);
        user.set_email(request.email.clone());

        let user = self.users.create(user).await?;
        self.credentials
            .add(&request.username, &request.password)
            .await?;

        let token = self.tokens.create_user_token(user.username(), None)?;
        info!("User registered");

        Ok((user, TokenResponse::bearer(token, MSG_REGISTERED)))
    }

    /// Delete an account: the user record and its stored credentials
    ///
    /// Returns false when no user has the given ID.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, id: UserId) -> Result<bool, DomainError> {
        let Some(user) = self.users.get_by_id(id).await? else {
            return Ok(false);
        };

        if !self.users.delete(id).await? {
            return Ok(false);
        }
        self.credentials.remove(user.username()).await?;
        info!(username = %user.username(), "Account deleted");

        Ok(true)
    }
}
