//! Service information and health endpoints

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

/// Root endpoint response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: String,
    pub documentation: String,
}

/// Health response with authentication setup details
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub auth_mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_registered: Option<usize>,
    pub jwt_algorithm: String,
    pub jwt_expire_minutes: i64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: state.settings.app_title.clone(),
        version: state.settings.app_version.clone(),
        documentation: "/health".to_string(),
    })
}

/// GET /health
///
/// Reports `degraded` when the user store cannot be counted.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let users_registered = match state.user_service.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            tracing::warn!(error = %e, "User store unavailable during health check");
            None
        }
    };

    let status = if users_registered.is_some() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    let response = HealthResponse {
        status,
        version: state.settings.app_version.clone(),
        auth_mode: "JWT".to_string(),
        users_registered,
        jwt_algorithm: state.settings.algorithm.to_string(),
        jwt_expire_minutes: state.settings.access_token_expire_minutes,
    };

    (StatusCode::OK, Json(response))
}
