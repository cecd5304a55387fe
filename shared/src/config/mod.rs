//! Configuration module with business-specific sub-modules
//!
//! Configuration is loaded once at process start and passed by reference to
//! the services that need it. There is no ambient lookup at call time.

pub mod auth;
pub mod database;

pub use auth::{CookieConfig, JwtConfig};
pub use database::DatabaseConfig;
