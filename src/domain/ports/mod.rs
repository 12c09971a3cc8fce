//! Domain ports (hexagonal architecture boundaries)

pub mod outbound;

pub use outbound::{HashError, HashService};
