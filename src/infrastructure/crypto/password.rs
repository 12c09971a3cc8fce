//! Password hashing utilities

use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};
use tracing::debug;

use crate::domain::{HashError, HashService};

/// Longest input bcrypt hashes without truncating.
pub const BCRYPT_MAX_INPUT: usize = 72;

/// Hash a password using bcrypt
pub fn hash_password(password: &str, cost: u32) -> Result<String, HashError> {
    if password.len() > BCRYPT_MAX_INPUT {
        return Err(HashError::InputTooLong {
            max: BCRYPT_MAX_INPUT,
        });
    }
    hash(password, cost).map_err(|e| HashError::Crypto(e.to_string()))
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hashed: &str) -> Result<bool, HashError> {
    verify(password, hashed).map_err(|e| HashError::Crypto(e.to_string()))
}

/// bcrypt-backed [`HashService`]. Hashing runs on the blocking pool.
#[derive(Debug, Clone)]
pub struct BcryptHashService {
    cost: u32,
}

impl BcryptHashService {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHashService {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}

#[async_trait]
impl HashService for BcryptHashService {
    async fn encrypt(&self, plaintext: &str) -> Result<String, HashError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || hash_password(&plaintext, cost))
            .await
            .map_err(|e| HashError::Join(e.to_string()))??;
        debug!(cost, "Password hashed");
        Ok(hashed)
    }

    async fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, HashError> {
        let plaintext = plaintext.to_owned();
        let hashed = hashed.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&plaintext, &hashed))
            .await
            .map_err(|e| HashError::Join(e.to_string()))?
    }
}
