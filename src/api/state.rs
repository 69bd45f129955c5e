//! Application state for shared services

use std::sync::Arc;

use crate::config::Settings;
use crate::infrastructure::auth::AuthService;
use crate::infrastructure::user::UserService;

/// Services shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
}
