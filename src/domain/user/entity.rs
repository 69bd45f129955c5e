//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Numeric user identifier, assigned by the store on creation
pub type UserId = u64;

/// User record held by the user store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Assigned on creation; `None` until stored
    #[serde(default)]
    id: Option<UserId>,
    /// Unique login name, also the store key
    username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Create a new, active, not yet stored user
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            email: None,
            is_active: true,
            created_at: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    // Getters

    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    // Mutators

    pub fn set_id(&mut self, id: UserId) {
        self.id = Some(id);
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
    }

    pub fn set_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = Some(created_at);
    }

    pub fn activate(&mut self) {
        self.is_active = true;
    }

    pub fn deactivate(&mut self) {
        self.is_active = false;
    }
}
