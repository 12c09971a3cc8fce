//! Identity module: user account management
//!
//! Contains the `UserService` which orchestrates the account use-cases:
//! registration, renaming, lookups, last-login tracking and deletion.

pub mod service;

pub use service::UserService;
