//! Shared HTTP types

pub mod error;
pub mod json;

pub use error::{ApiError, ApiErrorType, ErrorResponse};
pub use json::Json;
