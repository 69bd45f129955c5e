use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User not found: {username}")]
    UserNotFound { username: String },

    #[error("Inactive user: {username}")]
    InactiveUser { username: String },

    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    #[error("User {username} already exists")]
    DuplicateUser { username: String },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn user_not_found(username: impl Into<String>) -> Self {
        Self::UserNotFound {
            username: username.into(),
        }
    }

    pub fn inactive_user(username: impl Into<String>) -> Self {
        Self::InactiveUser {
            username: username.into(),
        }
    }

    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    pub fn duplicate_user(username: impl Into<String>) -> Self {
        Self::DuplicateUser {
            username: username.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Re-label any failure as `InvalidToken`, keeping the original detail.
    pub fn into_invalid_token(self) -> Self {
        match self {
            Self::InvalidToken { .. } => self,
            other => Self::invalid_token(other.to_string()),
        }
    }
}
