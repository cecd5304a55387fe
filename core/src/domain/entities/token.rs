//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT issuer
pub const JWT_ISSUER: &str = "keyrail";

/// JWT audience
pub const JWT_AUDIENCE: &str = "keyrail-api";

/// Claims structure for the JWT payload
///
/// Access and refresh tokens share this shape; the two differ only in TTL.
/// `extra` carries any caller-supplied public claims and is flattened into
/// the payload on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token, revocation key)
    pub jti: String,

    /// Caller-supplied public claims
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Claims {
    /// Creates new claims for a token expiring after `ttl`.
    ///
    /// Every call mints a fresh UUIDv4 `jti`; two encodes of the same
    /// logical claims never share an identifier.
    pub fn new(subject: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiry = now + ttl;

        Self {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
            extra: serde_json::Map::new(),
        }
    }

    /// Creates claims carrying caller-supplied public claims.
    pub fn with_extra(
        subject: Uuid,
        ttl: Duration,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            extra,
            ..Self::new(subject, ttl)
        }
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp();
        now >= self.exp
    }

    /// Gets the subject ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn subject_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    /// Expiry as a `DateTime<Utc>`
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Refresh token record stored in the database
///
/// Holds a one-way hash of the raw token value; the raw value is never
/// persisted. `is_revoked` transitions false -> true exactly once and is
/// never reverted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Hashed token value (SHA-256 hex)
    pub token_hash: String,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub is_revoked: bool,
}

impl RefreshTokenRecord {
    /// Creates a new refresh token record
    pub fn new(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            created_at: Utc::now(),
            expires_at,
            is_revoked: false,
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }

    /// Checks if the record is still redeemable (not expired, not revoked)
    pub fn is_valid(&self) -> bool {
        !self.is_expired() && !self.is_revoked
    }

    /// Marks the record revoked
    pub fn revoke(&mut self) {
        self.is_revoked = true;
    }
}

/// Entry in the revocation ledger
///
/// Insert-only: created on logout or when a refresh token is rotated away,
/// never updated. Entries may be garbage-collected once the associated token
/// expiry has passed; this bounds storage and does not affect correctness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevokedEntry {
    /// Token identifier (jti), unique key
    pub jti: String,

    /// Timestamp of revocation
    pub revoked_at: DateTime<Utc>,
}

impl RevokedEntry {
    /// Creates a new ledger entry for `jti`
    pub fn new(jti: impl Into<String>) -> Self {
        Self {
            jti: jti.into(),
            revoked_at: Utc::now(),
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair with explicit expiry windows
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}
