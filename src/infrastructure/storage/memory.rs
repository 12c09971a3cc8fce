//! In-memory user repository

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{DomainError, DomainResult, User, UserPatch, UserRepositoryInterface};

/// In-memory storage for development and testing.
///
/// Locks are always taken `usernames` first, then `users`, and never held
/// across the two maps in the opposite order.
pub struct InMemoryUserRepository {
    users: DashMap<i64, User>,
    usernames: DashMap<String, i64>,
    id_counter: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            usernames: DashMap::new(),
            id_counter: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn username_taken(username: &str) -> DomainError {
    DomainError::Conflict(format!("Username '{}' already exists", username))
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUserRepository {
    async fn save(&self, user: User) -> DomainResult<i64> {
        match self.usernames.entry(user.username.clone()) {
            Entry::Occupied(_) => Err(username_taken(&user.username)),
            Entry::Vacant(slot) => {
                let id = self.id_counter.fetch_add(1, Ordering::SeqCst);
                self.users.insert(id, User { id, ..user });
                slot.insert(id);
                Ok(id)
            }
        }
    }

    async fn update(&self, patch: UserPatch) -> DomainResult<()> {
        let id = patch.id;
        if !self.users.contains_key(&id) {
            return Err(DomainError::user_not_found("id", id));
        }

        // Claim the new name before touching the user.
        let mut released = None;
        if let Some(ref username) = patch.username {
            match self.usernames.entry(username.clone()) {
                Entry::Occupied(owner) if *owner.get() != id => {
                    return Err(username_taken(username));
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(slot) => {
                    let Some(user) = self.users.get(&id) else {
                        return Err(DomainError::user_not_found("id", id));
                    };
                    released = Some(user.username.clone());
                    drop(user);
                    slot.insert(id);
                }
            }
        }

        let applied = match self.users.get_mut(&id) {
            Some(mut user) => {
                patch.apply_to(&mut user);
                true
            }
            None => false,
        };

        if !applied {
            // Deleted concurrently; give the claimed name back.
            if let Some(ref username) = patch.username {
                self.usernames.remove_if(username, |_, owner| *owner == id);
            }
            return Err(DomainError::user_not_found("id", id));
        }

        if let Some(old) = released {
            self.usernames.remove_if(&old, |_, owner| *owner == id);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<User> {
        self.users
            .get(&id)
            .map(|u| u.value().clone())
            .ok_or_else(|| DomainError::user_not_found("id", id))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<User> {
        let id = self
            .usernames
            .get(username)
            .map(|e| *e.value())
            .ok_or_else(|| DomainError::user_not_found("username", username))?;

        self.users
            .get(&id)
            .map(|u| u.value().clone())
            .ok_or_else(|| DomainError::user_not_found("username", username))
    }

    async fn delete_by_id(&self, id: i64) -> DomainResult<()> {
        let (_, user) = self
            .users
            .remove(&id)
            .ok_or_else(|| DomainError::user_not_found("id", id))?;

        self.usernames.remove_if(&user.username, |_, owner| *owner == id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::ErrorKind;

    fn new_user(username: &str) -> User {
        User {
            id: 0,
            username: username.to_string(),
            password: "hash".to_string(),
            joined_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_save_assigns_sequential_ids() {
        let repo = InMemoryUserRepository::new();

        assert_eq!(repo.save(new_user("alice")).await.unwrap(), 1);
        assert_eq!(repo.save(new_user("bob")).await.unwrap(), 2);

        let bob = repo.find_by_id(2).await.unwrap();
        assert_eq!(bob.id, 2);
        assert_eq!(bob.username, "bob");
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_username_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.save(new_user("alice")).await.unwrap();

        let err = repo.save(new_user("alice")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_rename_moves_username_index() {
        let repo = InMemoryUserRepository::new();
        let id = repo.save(new_user("alice")).await.unwrap();

        repo.update(UserPatch::username(id, "alicia")).await.unwrap();

        assert_eq!(repo.find_by_username("alicia").await.unwrap().id, id);
        let err = repo.find_by_username("alice").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // The old name is free again.
        repo.save(new_user("alice")).await.unwrap();
    }

    #[tokio::test]
    async fn test_rename_to_taken_name_conflicts() {
        let repo = InMemoryUserRepository::new();
        let alice = repo.save(new_user("alice")).await.unwrap();
        repo.save(new_user("bob")).await.unwrap();

        let err = repo.update(UserPatch::username(alice, "bob")).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(repo.find_by_id(alice).await.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn test_rename_to_own_name_is_allowed() {
        let repo = InMemoryUserRepository::new();
        let id = repo.save(new_user("alice")).await.unwrap();

        repo.update(UserPatch::username(id, "alice")).await.unwrap();
        assert_eq!(repo.find_by_username("alice").await.unwrap().id, id);
    }

    #[tokio::test]
    async fn test_last_login_patch_keeps_other_fields() {
        let repo = InMemoryUserRepository::new();
        let id = repo.save(new_user("alice")).await.unwrap();
        let at = Utc.with_ymd_and_hms(2024, 7, 8, 9, 10, 0).unwrap();

        repo.update(UserPatch::last_login(id, at)).await.unwrap();

        let user = repo.find_by_id(id).await.unwrap();
        assert_eq!(user.last_login, Some(at));
        assert_eq!(user.username, "alice");
        assert_eq!(user.password, "hash");
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let repo = InMemoryUserRepository::new();

        assert_eq!(repo.find_by_id(1).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            repo.find_by_username("ghost").await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            repo.update(UserPatch::username(1, "x")).await.unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(repo.delete_by_id(1).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_frees_username() {
        let repo = InMemoryUserRepository::new();
        let id = repo.save(new_user("alice")).await.unwrap();

        repo.delete_by_id(id).await.unwrap();

        assert!(repo.is_empty());
        assert_eq!(repo.find_by_id(id).await.unwrap_err().kind(), ErrorKind::NotFound);
        let again = repo.save(new_user("alice")).await.unwrap();
        assert_ne!(again, id);
    }
}
