//! Outbound ports: credential hashing
//!
//! [`HashService`] is the contract the user service depends on for one-way
//! password hashing. The production implementation is
//! [`BcryptHashService`](crate::infrastructure::crypto::BcryptHashService).

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    /// The plaintext exceeds what the algorithm can hash without truncation.
    #[error("password length exceeds {max} bytes")]
    InputTooLong { max: usize },

    #[error("Crypto error: {0}")]
    Crypto(String),

    /// The blocking hash task panicked or was aborted.
    #[error("hash task failed: {0}")]
    Join(String),
}

/// One-way credential hashing.
///
/// The user service only ever calls [`encrypt`](HashService::encrypt).
/// [`verify`](HashService::verify) is for authentication flows that check a
/// submitted plaintext against a stored hash.
#[async_trait]
pub trait HashService: Send + Sync {
    async fn encrypt(&self, plaintext: &str) -> Result<String, HashError>;

    async fn verify(&self, plaintext: &str, hashed: &str) -> Result<bool, HashError>;
}
