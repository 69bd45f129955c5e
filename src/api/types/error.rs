//! API error types

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Challenge sent with 401 responses for bearer-protected routes
pub const BEARER_CHALLENGE: &str = "Bearer";

/// Error categories reported in the `error` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    AuthenticationError,
    NotFoundError,
    ConflictError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::AuthenticationError => write!(f, "authentication_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::ConflictError => write!(f, "conflict_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error body: `{"error": ..., "message": ..., "details": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiErrorType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
    /// Send `WWW-Authenticate: Bearer` with the response
    pub challenge: bool,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse {
                error: error_type,
                message: message.into(),
                details: None,
            },
            challenge: false,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.response.details = Some(details);
        self
    }

    pub fn with_challenge(mut self) -> Self {
        self.challenge = true;
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiErrorType::AuthenticationError, message)
    }

    /// 401 carrying the bearer challenge
    pub fn invalid_bearer(message: impl Into<String>) -> Self {
        Self::unauthorized(message).with_challenge()
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, ApiErrorType::ConflictError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(self.response)).into_response();

        if self.challenge {
            response.headers_mut().insert(
                header::WWW_AUTHENTICATE,
                HeaderValue::from_static(BEARER_CHALLENGE),
            );
        }

        response
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InactiveUser { .. } => Self::unauthorized(err.to_string()),
            DomainError::Authentication { message } => Self::unauthorized(message),
            DomainError::InvalidToken { .. } => Self::invalid_bearer(err.to_string()),
            DomainError::UserNotFound { .. } => Self::not_found(err.to_string()),
            DomainError::DuplicateUser { .. } => Self::conflict(err.to_string()),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Storage { .. }
            | DomainError::Internal { .. } => {
                tracing::error!(error = %err, "Request failed");
                Self::internal(err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.response.error, self.response.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid username");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.response.error, ApiErrorType::InvalidRequestError);
        assert_eq!(err.response.message, "Invalid username");
        assert!(!err.challenge);
    }

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::inactive_user("root"), StatusCode::UNAUTHORIZED),
            (DomainError::authentication("Inactive user"), StatusCode::UNAUTHORIZED),
            (DomainError::invalid_token("expired"), StatusCode::UNAUTHORIZED),
            (DomainError::user_not_found("ghost"), StatusCode::NOT_FOUND),
            (DomainError::duplicate_user("root"), StatusCode::CONFLICT),
            (DomainError::validation("too short"), StatusCode::BAD_REQUEST),
            (DomainError::storage("down"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            let api_err: ApiError = domain_err.into();
            assert_eq!(api_err.status, status);
        }
    }

    #[test]
    fn test_login_failure_keeps_outcome_message() {
        let api_err: ApiError = DomainError::authentication("Invalid credentials").into();

        assert_eq!(api_err.response.message, "Invalid credentials");
        assert!(!api_err.challenge);
    }

    #[test]
    fn test_invalid_token_sets_challenge() {
        let response = ApiError::from(DomainError::invalid_token("bad signature")).into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::unauthorized("Missing token")
            .with_details(serde_json::json!({"header": "authorization"}));
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"], "authentication_error");
        assert_eq!(json["message"], "Missing token");
        assert_eq!(json["details"]["header"], "authorization");
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let json = serde_json::to_string(&ApiError::not_found("nope").response).unwrap();
        assert!(!json.contains("details"));
    }
}
