use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::middleware::logging_middleware;
use super::state::AppState;
use super::users;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // Login, registration and current-user endpoints
        .merge(auth::create_auth_router())
        // User management (bearer protected)
        .nest("/users", users::create_users_router())
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
