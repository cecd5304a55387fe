//! Account service tests

use std::sync::Arc;

use kr_shared::config::JwtConfig;

use crate::errors::{AccountError, DomainError};
use crate::repositories::{MockRefreshTokenStore, MockUserRepository, UserRepository};
use crate::services::hashing::BcryptHasher;
use crate::services::token::{ClaimsCodec, TokenConfig, TokenIssuer};

use super::AccountService;

fn service() -> (
    Arc<MockUserRepository>,
    Arc<MockRefreshTokenStore>,
    AccountService<MockUserRepository, MockRefreshTokenStore, BcryptHasher>,
) {
    let users = Arc::new(MockUserRepository::new());
    let store = Arc::new(MockRefreshTokenStore::new());
    let hasher = Arc::new(BcryptHasher::new(4));

    let codec = Arc::new(
        ClaimsCodec::new(&JwtConfig::new("test-secret-for-unit-tests")).expect("codec setup"),
    );
    let issuer = TokenIssuer::new(
        codec,
        Arc::clone(&store),
        Arc::clone(&hasher),
        TokenConfig::default(),
    );

    let service = AccountService::new(Arc::clone(&users), hasher, issuer);
    (users, store, service)
}

#[tokio::test]
async fn test_register_stores_hashed_password() {
    let (users, _, service) = service();

    let id = service
        .register("alice@example.com", "s3cret-pass")
        .await
        .unwrap();

    let user = users.find_by_id(id).await.unwrap().expect("user saved");
    assert_eq!(user.email, "alice@example.com");
    assert_ne!(user.password_hash, "s3cret-pass");
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (_, _, service) = service();

    service
        .register("alice@example.com", "s3cret-pass")
        .await
        .unwrap();
    let result = service.register("alice@example.com", "other-pass").await;

    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::EmailTaken))
    ));
}

#[tokio::test]
async fn test_register_rejects_empty_password() {
    let (_, _, service) = service();

    let result = service.register("alice@example.com", "").await;
    assert!(matches!(result, Err(DomainError::InvalidArgument { .. })));
}

#[tokio::test]
async fn test_login_issues_pair_for_valid_credentials() {
    let (_, store, service) = service();

    let id = service
        .register("alice@example.com", "s3cret-pass")
        .await
        .unwrap();
    let pair = service
        .login("alice@example.com", "s3cret-pass")
        .await
        .unwrap();

    assert!(!pair.access_token.is_empty());
    // The refresh token was persisted for the right user
    assert_eq!(store.len().await, 1);
    let record = store
        .get(&sha256_hex(&pair.refresh_token))
        .await
        .expect("refresh record stored");
    assert_eq!(record.user_id, id);
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (_, _, service) = service();

    service
        .register("alice@example.com", "s3cret-pass")
        .await
        .unwrap();
    let result = service.login("alice@example.com", "wrong-pass").await;

    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_rejects_unknown_email() {
    let (_, _, service) = service();

    let result = service.login("nobody@example.com", "whatever").await;
    assert!(matches!(
        result,
        Err(DomainError::Account(AccountError::InvalidCredentials))
    ));
}

fn sha256_hex(input: &str) -> String {
    use sha2::{Digest, Sha256};
    hex::encode(Sha256::digest(input.as_bytes()))
}
