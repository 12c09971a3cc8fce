//! Credential hashing adapters

pub mod password;

pub use password::{hash_password, verify_password, BcryptHashService, BCRYPT_MAX_INPUT};
