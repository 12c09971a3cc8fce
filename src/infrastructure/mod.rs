//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod storage;

pub use crypto::BcryptHashService;
pub use database::{connect_and_migrate, init_database, DatabaseConfig, UserRepository};
pub use storage::InMemoryUserRepository;
