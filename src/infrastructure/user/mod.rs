//! User infrastructure module
//!
//! In-memory user store and the user service built on it.

mod repository;
mod service;

pub use repository::InMemoryUserRepository;
pub use service::UserService;
