pub mod error;
pub mod ports;
pub mod user;

// Re-export commonly used types
pub use error::{BoxError, DomainError, DomainResult, ErrorKind};
pub use ports::{HashError, HashService};
pub use user::{
    CredentialsView, RegisterUserDto, UpdateUsernameDto, User, UserPatch,
    UserRepositoryInterface, UserView,
};
