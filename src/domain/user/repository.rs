use async_trait::async_trait;

use super::{User, UserPatch};
use crate::domain::DomainResult;

/// Persistence capability for user accounts.
///
/// Implementations report a missing record as `DomainError::NotFound` and a
/// username collision as `DomainError::Conflict`.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Persist a new user and return the id assigned to it.
    async fn save(&self, user: User) -> DomainResult<i64>;

    /// Write the `Some` fields of `patch` onto the user with `patch.id`.
    async fn update(&self, patch: UserPatch) -> DomainResult<()>;

    async fn find_by_id(&self, id: i64) -> DomainResult<User>;
    async fn find_by_username(&self, username: &str) -> DomainResult<User>;

    async fn delete_by_id(&self, id: i64) -> DomainResult<()>;
}
