//! Unified error types for calendrical.
//!
//! This module provides a single error type shared by the value engine and the
//! formatter engine, so callers can propagate any failure with `?`.

// Submodule declarations
pub mod types;
pub mod conversions;

// Re-exports
pub use types::{Error, ParseError, Result};
