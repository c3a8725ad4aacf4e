//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from component
//! error types to the unified Error type.

use super::types::{Error, ParseError};

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::Print(err)
    }
}
