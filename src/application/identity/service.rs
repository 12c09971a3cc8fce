//! User account service: application-layer orchestration
//!
//! Validates input, hashes credentials, delegates persistence to the
//! repository and maps stored users into views. Repository errors are
//! returned unchanged; hash failures are reported as validation errors.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    CredentialsView, DomainError, DomainResult, HashService, RegisterUserDto,
    UpdateUsernameDto, User, UserPatch, UserRepositoryInterface, UserView,
};
use crate::shared::{is_unset_time, validate_input, RequestContext};

/// Orchestrates the account use-cases.
///
/// Generic over its collaborators so it stays decoupled from the concrete
/// hashing algorithm and persistence layer. Holds no mutable state and can be
/// shared across tasks.
pub struct UserService<H: HashService, R: UserRepositoryInterface> {
    hasher: Arc<H>,
    repo: Arc<R>,
}

impl<H: HashService, R: UserRepositoryInterface> Clone for UserService<H, R> {
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            repo: self.repo.clone(),
        }
    }
}

impl<H: HashService, R: UserRepositoryInterface> UserService<H, R> {
    pub fn new(hasher: Arc<H>, repo: Arc<R>) -> Self {
        Self { hasher, repo }
    }

    // ── Commands (mutations) ────────────────────────────────────

    /// Create an account with a freshly hashed password.
    pub async fn register(&self, ctx: &RequestContext, dto: RegisterUserDto) -> DomainResult<()> {
        if let Err(e) = validate_input(&dto) {
            warn!(error = %e, "Rejected registration");
            return Err(e);
        }

        let hashed = ctx
            .run(self.hasher.encrypt(&dto.password))
            .await?
            .map_err(|e| {
                warn!(username = %dto.username, error = %e, "Password could not be hashed");
                DomainError::validation_caused_by(e)
            })?;

        let user = User {
            id: 0,
            username: dto.username,
            password: hashed,
            joined_at: Utc::now(),
            last_login: None,
        };
        let username = user.username.clone();

        let id = ctx.run(self.repo.save(user)).await??;

        info!(user_id = id, username = %username, "New user registered");
        Ok(())
    }

    /// Rename the user with `id`.
    pub async fn set_username(
        &self,
        ctx: &RequestContext,
        id: i64,
        dto: UpdateUsernameDto,
    ) -> DomainResult<()> {
        if let Err(e) = validate_input(&dto) {
            warn!(user_id = id, error = %e, "Rejected username change");
            return Err(e);
        }

        ctx.run(self.repo.update(UserPatch::username(id, dto.username)))
            .await??;

        info!(user_id = id, "Username changed");
        Ok(())
    }

    /// Record the time of the user's latest login.
    pub async fn set_last_login(
        &self,
        ctx: &RequestContext,
        id: i64,
        last_login: DateTime<Utc>,
    ) -> DomainResult<()> {
        if is_unset_time(&last_login) {
            warn!(user_id = id, "Rejected unset last login time");
            return Err(DomainError::validation("lastLogin cannot be empty"));
        }

        ctx.run(self.repo.update(UserPatch::last_login(id, last_login)))
            .await??;

        debug!(user_id = id, "Last login recorded");
        Ok(())
    }

    /// Delete the user with `id`.
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> DomainResult<()> {
        ctx.run(self.repo.delete_by_id(id)).await??;

        info!(user_id = id, "User deleted");
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Display view of a user. Never includes the password hash.
    pub async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> DomainResult<UserView> {
        let user = ctx.run(self.repo.find_by_id(id)).await??;

        debug!(user_id = id, "User fetched");
        Ok(UserView::from(user))
    }

    /// Credentials of a user, including id and password hash, for
    /// authentication flows.
    pub async fn find_credentials_by_username(
        &self,
        ctx: &RequestContext,
        username: &str,
    ) -> DomainResult<CredentialsView> {
        let user = ctx.run(self.repo.find_by_username(username)).await??;

        debug!(user_id = user.id, "Credentials fetched");
        Ok(CredentialsView::from(user))
    }
}
