//! Infrastructure layer - Store, token and logging implementations

pub mod auth;
pub mod logging;
pub mod user;
