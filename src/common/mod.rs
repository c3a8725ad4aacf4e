//! Common types and utilities shared across the value and formatter engines.

// Submodule declarations
pub mod error;
pub mod math;

// Re-exports for convenience
pub use error::{Error, ParseError, Result};
