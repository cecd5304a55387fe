//! Account service: registration and credential login

mod service;

#[cfg(test)]
mod tests;

pub use service::AccountService;
