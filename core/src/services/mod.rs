//! Business services

pub mod account;
pub mod hashing;
pub mod token;

pub use account::AccountService;
pub use hashing::{BcryptHasher, CredentialHasher};
pub use token::{
    ClaimsCodec, RotationCoordinator, TokenCleanupConfig, TokenCleanupService, TokenConfig,
    TokenIssuer, TokenVerifier,
};
