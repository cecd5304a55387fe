//! Shared utilities and common types for the Keyrail server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error response structures
//! - Common type definitions

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CookieConfig, DatabaseConfig, JwtConfig};
pub use types::ErrorResponse;
