//! # User Accounts
//!
//! Account management service: registration, renaming, lookups, last-login
//! tracking and deletion over pluggable hashing and persistence.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: User entity, DTOs and views, repository and hashing ports, errors
//! - **application**: `UserService`, the use-case orchestration
//! - **infrastructure**: bcrypt hasher, in-memory and SeaORM repositories
//! - **shared**: request context, timestamp formatting, input validation
//!
//! ```ignore
//! let repo = Arc::new(InMemoryUserRepository::new());
//! let users = UserService::new(Arc::new(BcryptHashService::default()), repo);
//!
//! let ctx = RequestContext::with_timeout(Duration::from_secs(5));
//! users.register(&ctx, RegisterUserDto::new("alice", "secret")).await?;
//! let creds = users.find_credentials_by_username(&ctx, "alice").await?;
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod telemetry;

pub use application::UserService;
pub use config::{default_config_path, AppConfig};
pub use domain::{
    CredentialsView, DomainError, DomainResult, ErrorKind, HashError, HashService,
    RegisterUserDto, UpdateUsernameDto, User, UserPatch, UserRepositoryInterface, UserView,
};
pub use infrastructure::{
    connect_and_migrate, init_database, BcryptHashService, DatabaseConfig,
    InMemoryUserRepository, UserRepository,
};
pub use shared::RequestContext;
pub use telemetry::init_tracing;
