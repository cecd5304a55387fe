//! Credential hashing capability
//!
//! Password hashing policy is pluggable; the token services only depend on
//! the trait. Opaque-token hashing is deterministic (SHA-256 hex) because the
//! store looks records up by hash.

use sha2::{Digest, Sha256};

use crate::errors::{DomainError, DomainResult};

/// Bcrypt rejects inputs longer than 72 bytes
const MAX_PASSWORD_BYTES: usize = 72;

/// Hashing capability supplied to the token and account services
pub trait CredentialHasher: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash_password(&self, password: &str) -> DomainResult<String>;

    /// Verify a plaintext password against a stored hash
    fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool>;

    /// One-way digest of an opaque token value (refresh token lookup key)
    fn hash_opaque_token(&self, token: &str) -> String;
}

/// Default hasher: bcrypt for passwords, SHA-256 for opaque tokens
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash_password(&self, password: &str) -> DomainResult<String> {
        if password.is_empty() {
            return Err(DomainError::InvalidArgument {
                message: "Password cannot be empty".to_string(),
            });
        }
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(DomainError::InvalidArgument {
                message: format!("Password is too long (max {} bytes)", MAX_PASSWORD_BYTES),
            });
        }

        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            DomainError::Internal {
                message: "Failed to hash password".to_string(),
            }
        })
    }

    fn verify_password(&self, password: &str, hash: &str) -> DomainResult<bool> {
        if password.is_empty() || hash.is_empty() {
            return Ok(false);
        }

        bcrypt::verify(password, hash).map_err(|e| {
            tracing::error!("Password verification failed: {}", e);
            DomainError::Internal {
                message: "Failed to verify password".to_string(),
            }
        })
    }

    fn hash_opaque_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptHasher {
        // Minimum cost keeps the test suite fast
        BcryptHasher::new(4)
    }

    #[test]
    fn test_password_round_trip() {
        let hasher = hasher();
        let hash = hasher.hash_password("correct horse").unwrap();

        assert!(hasher.verify_password("correct horse", &hash).unwrap());
        assert!(!hasher.verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_empty_password_rejected() {
        let result = hasher().hash_password("");
        assert!(matches!(
            result,
            Err(DomainError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_overlong_password_rejected() {
        let result = hasher().hash_password(&"x".repeat(73));
        assert!(matches!(
            result,
            Err(DomainError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_verify_with_empty_inputs() {
        let hasher = hasher();
        assert!(!hasher.verify_password("", "some-hash").unwrap());
        assert!(!hasher.verify_password("password", "").unwrap());
    }

    #[test]
    fn test_opaque_token_hash_deterministic() {
        let hasher = hasher();
        let a = hasher.hash_opaque_token("token-value");
        let b = hasher.hash_opaque_token("token-value");
        let c = hasher.hash_opaque_token("other-value");

        assert_eq!(a, b);
        assert_ne!(a, c);
        // SHA-256 hex is 64 characters
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit()));
    }

    #[test]
    fn test_opaque_token_hash_hides_input() {
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test";
        let hash = hasher().hash_opaque_token(token);

        assert!(!hash.contains("eyJ"));
    }
}
