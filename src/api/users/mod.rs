//! User management endpoints (bearer protected)

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::middleware::RequireUser;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::user::{validate_email, validate_username, User, UserId};

/// Create the user management router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route(
            "/{user_id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/{user_id}/activate", post(activate_user))
        .route("/{user_id}/deactivate", post(deactivate_user))
}

/// Request to create a user record
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserApiRequest {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Request to update a user record; absent fields are left unchanged
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserApiRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total: usize,
}

fn not_found(user_id: UserId) -> ApiError {
    ApiError::not_found(format!("User '{}' not found", user_id))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let users = state.user_service.list().await?;
    let total = users.len();

    Ok(Json(ListUsersResponse { users, total }))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Json(request): Json<CreateUserApiRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    debug!(caller = %caller.username(), username = %request.username, "Creating user");

    validate_username(&request.username).map_err(|e| ApiError::bad_request(e.to_string()))?;
    if let Some(email) = &request.email {
        validate_email(email).map_err(|e| ApiError::bad_request(e.to_string()))?;
    }

    let mut user = User::new(request.username).with_active(request.is_active.unwrap_or(true));
    user.set_email(request.email);

    let user = state.user_service.create(user).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .user_service
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| not_found(user_id))?;

    Ok(Json(user))
}

/// PUT /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Path(user_id): Path<UserId>,
    Json(request): Json<UpdateUserApiRequest>,
) -> Result<Json<User>, ApiError> {
    debug!(caller = %caller.username(), user_id, "Updating user");

    let mut user = state
        .user_service
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| not_found(user_id))?;

    if let Some(email) = request.email {
        validate_email(&email).map_err(|e| ApiError::bad_request(e.to_string()))?;
        user.set_email(Some(email));
    }

    match request.is_active {
        Some(true) => user.activate(),
        Some(false) => user.deactivate(),
        None => {}
    }

    let user = state.user_service.update(user).await?;

    Ok(Json(user))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    RequireUser(caller): RequireUser,
    Path(user_id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    debug!(caller = %caller.username(), user_id, "Deleting user");

    if state.auth_service.delete_account(user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(user_id))
    }
}

/// POST /users/{user_id}/activate
pub async fn activate_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.user_service.activate(user_id).await?))
}

/// POST /users/{user_id}/deactivate
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireUser(_): RequireUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    Ok(Json(state.user_service.deactivate(user_id).await?))
}
