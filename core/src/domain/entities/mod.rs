//! Domain entities

pub mod token;
pub mod user;

pub use token::{Claims, RefreshTokenRecord, RevokedEntry, TokenPair};
pub use user::User;
