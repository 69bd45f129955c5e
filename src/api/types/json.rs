//! JSON extractor for request bodies
//!
//! Malformed bodies are answered with an [`ApiError`] instead of axum's plain
//! text rejection, so `/login`, `/register` and `/users` clients always get
//! the `{"error", "message", "details"}` shape.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json as AxumJson,
};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::error::{ApiError, ApiErrorType};

#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        AxumJson::<T>::from_request(req, state)
            .await
            .map(|AxumJson(value)| Json(value))
            .map_err(|rejection| body_error(&rejection))
    }
}

impl<T> IntoResponse for Json<T>
where
    T: serde::Serialize,
{
    fn into_response(self) -> Response {
        AxumJson(self.0).into_response()
    }
}

/// Map a body rejection to an error keeping axum's status code
fn body_error(rejection: &JsonRejection) -> ApiError {
    let (kind, message) = match rejection {
        JsonRejection::JsonDataError(err) => {
            ("data", format!("Invalid JSON data: {}", err.body_text()))
        }
        JsonRejection::JsonSyntaxError(err) => {
            ("syntax", format!("Invalid JSON syntax: {}", err.body_text()))
        }
        JsonRejection::MissingJsonContentType(_) => (
            "content_type",
            "Missing Content-Type header. Expected 'application/json'.".to_string(),
        ),
        JsonRejection::BytesRejection(err) => {
            ("body", format!("Failed to read request body: {}", err.body_text()))
        }
        _ => ("body", "Invalid JSON request".to_string()),
    };

    ApiError::new(rejection.status(), ApiErrorType::InvalidRequestError, message)
        .with_details(json!({ "kind": kind }))
}
