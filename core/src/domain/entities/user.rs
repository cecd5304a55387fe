//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account
///
/// Carries the bcrypt hash of the password, never the plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Email address (unique)
    pub email: String,

    /// Bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with a freshly generated ID
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("a@example.com", "$2b$12$hash");

        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.password_hash, "$2b$12$hash");
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User::new("a@example.com", "$2b$12$hash");
        let json = serde_json::to_string(&user).unwrap();

        assert!(!json.contains("$2b$12$hash"));
    }
}
