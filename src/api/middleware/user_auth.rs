//! Bearer token authentication extractor

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Extractor that requires a valid bearer token for an active user
///
/// Reads `Authorization: Bearer <token>`; every failure is a 401 carrying
/// `WWW-Authenticate: Bearer`.
#[derive(Debug, Clone)]
pub struct RequireUser(pub User);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_bearer_token(&parts.headers)?;

        debug!("Validating bearer token");

        let username = state.auth_service.validate_token(&token).await?;

        let user = state
            .auth_service
            .get_user_info(&username)
            .await
            .map_err(|e| ApiError::invalid_bearer(format!("Invalid token: {}", e)))?;

        Ok(RequireUser(user))
    }
}

/// Extract the token from an `Authorization: Bearer` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Err(ApiError::invalid_bearer("Not authenticated"));
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::invalid_bearer("Invalid Authorization header encoding"))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .or_else(|| auth_str.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::invalid_bearer("Invalid authentication scheme"))?;

    Ok(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer eyJhbGciOiJIUzI1NiJ9.test".parse().unwrap(),
        );

        assert_eq!(
            extract_bearer_token(&headers).unwrap(),
            "eyJhbGciOiJIUzI1NiJ9.test"
        );
    }

    #[test]
    fn test_missing_token() {
        let err = extract_bearer_token(&HeaderMap::new()).unwrap_err();

        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert!(err.challenge);
    }

    #[test]
    fn test_invalid_auth_scheme() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());

        let err = extract_bearer_token(&headers).unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert!(err.challenge);
    }

    #[test]
    fn test_empty_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer    ".parse().unwrap());

        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn test_trimmed_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            "Bearer   token-with-spaces   ".parse().unwrap(),
        );

        assert_eq!(extract_bearer_token(&headers).unwrap(), "token-with-spaces");
    }
}
