//! User aggregate
//!
//! Contains the User entity, DTOs, views and repository interface.

pub mod model;
pub mod repository;

mod dto_register;
mod dto_update;
mod view;

// Re-export model types
pub use model::{User, UserPatch};

// Re-export DTOs and views
pub use dto_register::RegisterUserDto;
pub use dto_update::UpdateUsernameDto;
pub use view::{CredentialsView, UserView};

// Re-export repository trait
pub use repository::UserRepositoryInterface;
