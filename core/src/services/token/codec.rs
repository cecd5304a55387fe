//! Claims codec: signing and parsing of token claims
//!
//! Stateless and pure: the codec holds only the signing material derived
//! from configuration at startup. It never consults the revocation ledger;
//! callers combine `decode` with ledger checks.

use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use chrono::Duration;
use uuid::Uuid;

use kr_shared::config::JwtConfig;

use crate::domain::entities::token::{Claims, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, DomainResult, TokenError};

/// Signs and parses JWT claims with a single shared secret
pub struct ClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    header: Header,
    issuer: String,
    audience: String,
}

impl ClaimsCodec {
    /// Creates a codec from the JWT configuration
    ///
    /// A missing or empty secret, an unrecognized algorithm name, or a
    /// non-HMAC algorithm is a fatal configuration error at startup, never
    /// a per-request one. Keys are derived from a single shared secret, so
    /// only the HS* family can ever sign successfully.
    pub fn new(config: &JwtConfig) -> DomainResult<Self> {
        if config.secret.trim().is_empty() {
            return Err(DomainError::Config {
                message: "JWT secret is required".to_string(),
            });
        }

        let algorithm: Algorithm =
            config
                .algorithm
                .parse()
                .map_err(|_| DomainError::Config {
                    message: format!("Unknown JWT algorithm: {}", config.algorithm),
                })?;

        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(DomainError::Config {
                message: format!(
                    "Algorithm {} requires asymmetric keys; only HS256/HS384/HS512 \
                     work with a shared secret",
                    config.algorithm
                ),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let issuer = if config.issuer.trim().is_empty() {
            JWT_ISSUER.to_string()
        } else {
            config.issuer.clone()
        };
        let audience = config
            .audience
            .clone()
            .unwrap_or_else(|| JWT_AUDIENCE.to_string());

        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&issuer]);
        validation.set_audience(&[&audience]);
        validation.validate_exp = true;
        // No expiry leeway: a token past its exp must never verify
        validation.leeway = 0;

        Ok(Self {
            encoding_key,
            decoding_key,
            validation,
            header: Header::new(algorithm),
            issuer,
            audience,
        })
    }

    /// Signs claims for `subject` expiring after `ttl`
    ///
    /// Mints a fresh random `jti` per call; returns the token and its jti.
    ///
    /// # Errors
    /// * `InvalidArgument` - `ttl` is zero or negative
    pub fn encode(&self, subject: Uuid, ttl: Duration) -> DomainResult<(String, String)> {
        self.encode_with_claims(subject, ttl, serde_json::Map::new())
    }

    /// Signs claims carrying caller-supplied public claims
    pub fn encode_with_claims(
        &self,
        subject: Uuid,
        ttl: Duration,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> DomainResult<(String, String)> {
        if ttl <= Duration::zero() {
            return Err(DomainError::InvalidArgument {
                message: "Token TTL must be positive".to_string(),
            });
        }

        let mut claims = Claims::with_extra(subject, ttl, extra);
        claims.iss = self.issuer.clone();
        claims.aud = self.audience.clone();

        let token = encode(&self.header, &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign token: {}", e);
            TokenError::IssuanceFailed
        })?;

        Ok((token, claims.jti))
    }

    /// Verifies signature and expiry, returning the claims
    ///
    /// # Errors
    /// * `TokenExpired` - expiry in the past
    /// * `MalformedToken` - unparseable token or bad signature
    pub fn decode(&self, token: &str) -> DomainResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                    TokenError::TokenExpired
                } else {
                    TokenError::MalformedToken
                }
            })?;

        Ok(token_data.claims)
    }
}
