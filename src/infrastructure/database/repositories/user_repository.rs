use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, Set, SqlErr,
};

use crate::domain::{DomainError, DomainResult, User, UserPatch, UserRepositoryInterface};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password: model.password_hash,
        joined_at: model.joined_at,
        last_login: model.last_login,
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}

/// Map write failures, turning unique violations on `username` into conflicts.
fn write_err(e: DbErr, username: Option<&str>) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Conflict(match username {
            Some(name) => format!("Username '{}' already exists", name),
            None => "Username already exists".to_string(),
        }),
        _ => db_err(e),
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn save(&self, user: User) -> DomainResult<i64> {
        let new_user = user::ActiveModel {
            id: NotSet,
            username: Set(user.username.clone()),
            password_hash: Set(user.password),
            joined_at: Set(user.joined_at),
            last_login: Set(user.last_login),
        };

        let model = new_user
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, Some(&user.username)))?;

        Ok(model.id)
    }

    async fn update(&self, patch: UserPatch) -> DomainResult<()> {
        let id = patch.id;
        if patch.username.is_none() && patch.last_login.is_none() {
            // Nothing to write, but a missing id is still reported.
            return self.find_by_id(id).await.map(|_| ());
        }

        let mut query = user::Entity::update_many().filter(user::Column::Id.eq(id));

        if let Some(ref username) = patch.username {
            query = query.col_expr(user::Column::Username, Expr::value(username.clone()));
        }
        if let Some(at) = patch.last_login {
            query = query.col_expr(user::Column::LastLogin, Expr::value(at));
        }

        let result = query
            .exec(&self.db)
            .await
            .map_err(|e| write_err(e, patch.username.as_deref()))?;

        if result.rows_affected == 0 {
            return Err(DomainError::user_not_found("id", id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<User> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model
            .map(user_model_to_domain)
            .ok_or_else(|| DomainError::user_not_found("id", id))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<User> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model
            .map(user_model_to_domain)
            .ok_or_else(|| DomainError::user_not_found("username", username))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::user_not_found("id", id));
        }

        Ok(())
    }
}
