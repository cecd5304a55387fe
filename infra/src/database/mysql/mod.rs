//! MySQL implementations of the core persistence traits

mod refresh_token_store_impl;
mod revocation_ledger_impl;
mod user_repository_impl;

pub use refresh_token_store_impl::MySqlRefreshTokenStore;
pub use revocation_ledger_impl::MySqlRevocationLedger;
pub use user_repository_impl::MySqlUserRepository;
