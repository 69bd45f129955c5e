//! Token claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered claim holding the token subject (the username)
pub const SUBJECT_CLAIM: &str = "sub";

/// Registered claim holding the expiry as a Unix timestamp in seconds
pub const EXPIRY_CLAIM: &str = "exp";

/// The mapping of data carried inside a token
///
/// Claims are an open JSON object; `sub` and `exp` have typed accessors but
/// any other field survives an issue/verify round trip unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims carrying only a subject
    pub fn for_subject(subject: impl Into<String>) -> Self {
        let mut claims = Self::new();
        claims.insert(SUBJECT_CLAIM, Value::String(subject.into()));
        claims
    }

    /// Add or replace a claim, returning the previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `sub` claim, if present and a string
    pub fn subject(&self) -> Option<&str> {
        self.get(SUBJECT_CLAIM).and_then(Value::as_str)
    }

    /// The `exp` claim as Unix seconds, if present and an integer
    pub fn expires_at(&self) -> Option<i64> {
        self.get(EXPIRY_CLAIM).and_then(Value::as_i64)
    }

    /// Set `exp`, overwriting any value already present
    pub fn set_expiry(&mut self, expires_at: DateTime<Utc>) {
        self.insert(EXPIRY_CLAIM, expires_at.timestamp());
    }

    /// A token is expired once the current second reaches `exp`.
    /// Claims without an `exp` are treated as expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(exp) => Utc::now().timestamp() >= exp,
            None => true,
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_for_subject() {
        let claims = Claims::for_subject("root");

        assert_eq!(claims.subject(), Some("root"));
        assert_eq!(claims.len(), 1);
        assert!(claims.expires_at().is_none());
    }

    #[test]
    fn test_non_string_subject_is_absent() {
        let mut claims = Claims::new();
        claims.insert(SUBJECT_CLAIM, 42);

        assert!(claims.subject().is_none());
    }

    #[test]
    fn test_set_expiry_overwrites() {
        let mut claims = Claims::new();
        claims.insert(EXPIRY_CLAIM, 1);

        let at = Utc::now() + Duration::minutes(30);
        claims.set_expiry(at);

        assert_eq!(claims.expires_at(), Some(at.timestamp()));
    }

    #[test]
    fn test_expiry_checks() {
        let mut claims = Claims::for_subject("root");
        assert!(claims.is_expired());

        claims.set_expiry(Utc::now() + Duration::minutes(5));
        assert!(!claims.is_expired());

        claims.set_expiry(Utc::now());
        assert!(claims.is_expired());

        claims.set_expiry(Utc::now() - Duration::minutes(5));
        assert!(claims.is_expired());
    }

    #[test]
    fn test_serializes_as_plain_object() {
        let mut claims = Claims::for_subject("root");
        claims.insert("role", "admin");

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value, json!({"sub": "root", "role": "admin"}));

        let back: Claims = serde_json::from_value(value).unwrap();
        assert_eq!(back, claims);
    }
}
