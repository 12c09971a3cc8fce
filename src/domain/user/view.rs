use serde::Serialize;

use super::User;
use crate::shared::{format_display_time, format_optional_display_time};

/// Display view of a user. Carries neither the id nor the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub username: String,
    pub last_login: String,
    pub joined_at: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            last_login: format_optional_display_time(user.last_login),
            joined_at: format_display_time(&user.joined_at),
        }
    }
}

/// Credentials of a user, for authentication flows that verify a submitted
/// password against the stored hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialsView {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub joined_at: String,
    pub last_login: String,
}

impl From<User> for CredentialsView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            password: user.password,
            joined_at: format_display_time(&user.joined_at),
            last_login: format_optional_display_time(user.last_login),
        }
    }
}
