//! Token domain
//!
//! Claims carried by access tokens and the strategy trait that signs and
//! verifies them.

mod claims;
mod strategy;

pub use claims::{Claims, EXPIRY_CLAIM, SUBJECT_CLAIM};
pub use strategy::TokenStrategy;

#[cfg(test)]
pub use strategy::MockTokenStrategy;
