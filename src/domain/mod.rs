//! Domain layer - Core entities, store traits and errors

pub mod auth;
pub mod error;
pub mod token;
pub mod user;

pub use auth::{AuthOutcome, CredentialRepository, LoginRequest, RegisterRequest, TokenResponse};
pub use error::DomainError;
pub use token::{Claims, TokenStrategy};
pub use user::{User, UserRepository};
