pub mod context;
pub mod time;
pub mod validations;

pub use context::*;
pub use time::*;
pub use validations::*;
