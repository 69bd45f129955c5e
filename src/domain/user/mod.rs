//! User domain
//!
//! This module provides the user record, validation rules for new accounts,
//! and the repository trait the user store implements.

mod entity;
mod repository;
mod validation;

pub use entity::{User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_email, validate_password, validate_username, UserValidationError};

#[cfg(test)]
pub use repository::MockUserRepository;
