//! User repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainResult;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user
    /// * `Err(DomainError)` - Save failed (e.g. duplicate email)
    async fn save(&self, user: User) -> DomainResult<User>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;
}
