//! Repository interfaces (capability traits) for persistence collaborators
//!
//! Concrete implementations live in the infrastructure layer; the mocks here
//! are compiled for tests only.

pub mod refresh_token;
pub mod revocation;
pub mod user;

pub use refresh_token::RefreshTokenStore;
pub use revocation::RevocationLedger;
pub use user::UserRepository;

#[cfg(test)]
pub use refresh_token::MockRefreshTokenStore;
#[cfg(test)]
pub use revocation::MockRevocationLedger;
#[cfg(test)]
pub use user::MockUserRepository;
