/// Core Module for gridcatch
///
/// Shared infrastructure used by every other module: the error type and the
/// crate-wide result alias.

pub mod error;

// Re-export commonly used types for convenience
pub use error::{GameError, Result};
