//! Login request/response models

use serde::{Deserialize, Serialize};

pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const MSG_USER_NOT_FOUND: &str = "User not found";
pub const MSG_INACTIVE_USER: &str = "Inactive user";
pub const MSG_LOGIN_SUCCESSFUL: &str = "Login successful";
pub const MSG_REGISTERED: &str = "User registered successfully";

/// Token type reported to clients
pub const BEARER: &str = "bearer";

/// Login request body: `{"user": ..., "pass": ...}`
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    pub user: String,
    #[serde(rename = "pass", alias = "password")]
    pub password: String,
}

impl LoginRequest {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("user", &self.user)
            .field("password", &"[hidden]")
            .finish()
    }
}

/// Account registration request body
#[derive(Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[hidden]")
            .field("email", &self.email)
            .finish()
    }
}

/// Successful login response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub message: String,
}

impl TokenResponse {
    pub fn bearer(access_token: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: BEARER.to_string(),
            message: message.into(),
        }
    }
}

/// Result of a credential check: never an error, always a message
#[derive(Debug, Clone, PartialEq)]
pub struct AuthOutcome {
    pub success: bool,
    pub token: Option<String>,
    pub message: String,
}

impl AuthOutcome {
    pub fn success(token: impl Into<String>) -> Self {
        Self {
            success: true,
            token: Some(token.into()),
            message: MSG_LOGIN_SUCCESSFUL.to_string(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            token: None,
            message: message.into(),
        }
    }
}
