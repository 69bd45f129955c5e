//! Authentication domain
//!
//! Credential store trait plus the request, response and outcome types of the
//! login flow.

mod credentials;
mod models;

pub use credentials::CredentialRepository;
pub use models::{
    AuthOutcome, LoginRequest, RegisterRequest, TokenResponse, BEARER, MSG_INACTIVE_USER,
    MSG_INVALID_CREDENTIALS, MSG_LOGIN_SUCCESSFUL, MSG_REGISTERED, MSG_USER_NOT_FOUND,
};

#[cfg(test)]
pub use credentials::MockCredentialRepository;
