//! Authentication infrastructure module
//!
//! JWT signing, the token service, the in-memory credential store and the
//! authentication service that ties them to the user store.

mod credentials;
mod jwt;
mod service;
mod token_service;

pub use credentials::InMemoryCredentialRepository;
pub use jwt::{JwtConfig, JwtTokenStrategy};
pub use service::AuthService;
pub use token_service::TokenService;
