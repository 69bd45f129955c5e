//! JWT Auth API
//!
//! A small authentication service:
//! - Username/password login against an in-memory credential store
//! - Signed, expiring JWT access tokens (HS256/HS384/HS512)
//! - Bearer-protected user management endpoints

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::{get_settings, Settings};

use std::sync::Arc;

use tracing::info;

use api::state::AppState;
use infrastructure::auth::{
    AuthService, InMemoryCredentialRepository, JwtConfig, JwtTokenStrategy, TokenService,
};
use infrastructure::user::{InMemoryUserRepository, UserService};

/// Create the application state: stores seeded with the configured test user,
/// a JWT token service and the services built on them
pub fn create_app_state(settings: Arc<Settings>) -> AppState {
    let credentials = Arc::new(InMemoryCredentialRepository::from_settings(&settings));
    let users = Arc::new(InMemoryUserRepository::from_settings(&settings));

    let strategy = JwtTokenStrategy::new(JwtConfig::from_settings(&settings));
    let token_service = TokenService::new(Arc::new(strategy));

    let auth_service = AuthService::new(credentials, users.clone(), token_service);
    let user_service = UserService::new(users);

    info!(
        algorithm = %settings.algorithm,
        expire_minutes = settings.access_token_expire_minutes,
        test_user = %settings.test_user,
        "Application state created"
    );

    AppState {
        settings,
        auth_service: Arc::new(auth_service),
        user_service: Arc::new(user_service),
    }
}
