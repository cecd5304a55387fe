//! Account registration and login

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;
use crate::errors::{AccountError, DomainResult};
use crate::repositories::{RefreshTokenStore, UserRepository};
use crate::services::hashing::CredentialHasher;
use crate::services::token::TokenIssuer;

/// Service handling signup and credential login
///
/// Thin orchestration over the user repository, the hashing capability, and
/// the token issuer. Failed logins are indistinguishable between "no such
/// user" and "wrong password".
pub struct AccountService<U: UserRepository, S: RefreshTokenStore, H: CredentialHasher> {
    users: Arc<U>,
    hasher: Arc<H>,
    issuer: TokenIssuer<S, H>,
}

impl<U: UserRepository, S: RefreshTokenStore, H: CredentialHasher> AccountService<U, S, H> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, issuer: TokenIssuer<S, H>) -> Self {
        Self {
            users,
            hasher,
            issuer,
        }
    }

    /// Creates a new account
    ///
    /// # Errors
    /// * `EmailTaken` - an account with this email already exists
    /// * `InvalidArgument` - empty or overlong password
    pub async fn register(&self, email: &str, password: &str) -> DomainResult<Uuid> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(AccountError::EmailTaken.into());
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self.users.save(User::new(email, password_hash)).await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user.id)
    }

    /// Authenticates credentials and issues a token pair
    ///
    /// # Errors
    /// * `InvalidCredentials` - unknown email or wrong password
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let Some(user) = self.users.find_by_email(email).await? else {
            tracing::warn!("Login attempt for unknown email");
            return Err(AccountError::InvalidCredentials.into());
        };

        if !self.hasher.verify_password(password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(AccountError::InvalidCredentials.into());
        }

        let pair = self.issuer.issue_pair(user.id).await?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(pair)
    }
}
