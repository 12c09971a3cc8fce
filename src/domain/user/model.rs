use chrono::{DateTime, Utc};

/// Persisted user account.
///
/// `password` always holds the hashed credential. `id` is assigned by the
/// repository on save and is `0` until then.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub joined_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Partial update of a single user, keyed by `id`.
///
/// Only the `Some` fields are written; everything else is left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub id: i64,
    pub username: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn username(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: Some(username.into()),
            ..Default::default()
        }
    }

    pub fn last_login(id: i64, at: DateTime<Utc>) -> Self {
        Self {
            id,
            last_login: Some(at),
            ..Default::default()
        }
    }

    /// Apply the set fields onto `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(ref username) = self.username {
            user.username = username.clone();
        }
        if let Some(at) = self.last_login {
            user.last_login = Some(at);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample_user() -> User {
        User {
            id: 3,
            username: "alice".into(),
            password: "hashed".into(),
            joined_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            last_login: None,
        }
    }

    #[test]
    fn test_username_patch_leaves_last_login() {
        let mut user = sample_user();
        UserPatch::username(3, "bob").apply_to(&mut user);

        assert_eq!(user.username, "bob");
        assert_eq!(user.last_login, None);
        assert_eq!(user.password, "hashed");
    }

    #[test]
    fn test_last_login_patch_leaves_username() {
        let mut user = sample_user();
        let at = Utc.with_ymd_and_hms(2024, 6, 2, 9, 30, 0).unwrap();
        UserPatch::last_login(3, at).apply_to(&mut user);

        assert_eq!(user.username, "alice");
        assert_eq!(user.last_login, Some(at));
    }
}
