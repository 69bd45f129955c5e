//! Authentication API endpoints
//!
//! Login, registration, current-user and protected-data endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::auth::{LoginRequest, RegisterRequest, TokenResponse};
use crate::domain::user::User;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/me", get(get_current_user))
        .route("/protected", get(protected))
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: User,
    pub message: String,
}

/// Protected data response
#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    pub message: String,
    pub user_info: User,
}

/// Login with username and password
///
/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let response = state.auth_service.login(&request).await?;
    Ok(Json(response))
}

/// Create an account and log it in
///
/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let (user, token) = state.auth_service.register(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            access_token: token.access_token,
            token_type: token.token_type,
            user,
            message: token.message,
        }),
    ))
}

/// GET /me
pub async fn get_current_user(RequireUser(user): RequireUser) -> Json<User> {
    Json(user)
}

/// GET /protected
pub async fn protected(RequireUser(user): RequireUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: format!(
            "Hello {}, you have accessed protected data",
            user.username()
        ),
        user_info: user,
    })
}
