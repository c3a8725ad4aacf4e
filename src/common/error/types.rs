//! Error taxonomy for calendrical.
//!
//! Field failures are split in two: a value outside the absolute domain of a
//! field (month 13) is [`Error::FieldOutOfRange`], while a value that is legal
//! on its own but not together with other fields (February 30) is
//! [`Error::InvalidForContext`].
use crate::calendar::Field;
use thiserror::Error;

/// Main error type for calendrical operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was missing or unusable
    #[error("Precondition failed: {0}")]
    Precondition(&'static str),

    /// A field value is outside the absolute domain of the field
    #[error("Invalid value for {field}: {value} (valid values {min} - {max})")]
    FieldOutOfRange {
        field: Field,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A field value is valid on its own but not in combination with other fields
    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidForContext {
        field: Field,
        value: i64,
        reason: String,
    },

    /// The result of a calculation falls outside the supported span
    #[error("Arithmetic out of range: {0}")]
    ArithmeticRange(String),

    /// Text did not match the formatter
    #[error(transparent)]
    Parse(ParseError),

    /// A field needed for printing or resolution could not be derived
    #[error("Field {field} is not available")]
    UnsupportedField { field: &'static str },

    /// A field value is known but cannot be rendered by the formatter
    #[error("Unable to print {field} value {value}: {reason}")]
    Unprintable {
        field: &'static str,
        value: i64,
        reason: &'static str,
    },

    /// A formatter pattern string is malformed
    #[error("Invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// The zone identifier is not known
    #[error("Unknown time-zone id '{0}'")]
    UnknownZone(String),

    /// A zone resolver rejected a local date-time in a gap or overlap
    #[error("Zone resolution failed: {0}")]
    ZoneResolution(String),

    /// The output sink of a print operation failed
    #[error("Print error: {0}")]
    Print(std::fmt::Error),
}

impl Error {
    /// Build a [`Error::FieldOutOfRange`] for `field` using its declared bounds.
    pub(crate) fn out_of_range(field: Field, value: i64) -> Self {
        let (min, max) = field.range();
        Error::FieldOutOfRange {
            field,
            value,
            min,
            max,
        }
    }

    /// Build a [`Error::InvalidForContext`].
    pub(crate) fn invalid(field: Field, value: i64, reason: impl Into<String>) -> Self {
        Error::InvalidForContext {
            field,
            value,
            reason: reason.into(),
        }
    }

    /// Build a [`Error::ArithmeticRange`].
    pub(crate) fn overflow(what: impl Into<String>) -> Self {
        Error::ArithmeticRange(what.into())
    }
}

/// Failure to match text against a formatter.
///
/// `index` is the byte offset into `text` at which matching failed and
/// `reason` names the pattern element that could not be satisfied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Text '{text}' could not be parsed at index {index}: {reason}")]
pub struct ParseError {
    text: String,
    index: usize,
    reason: String,
}

impl ParseError {
    pub(crate) fn new(text: &str, index: usize, reason: impl Into<String>) -> Self {
        Self {
            text: text.to_owned(),
            index,
            reason: reason.into(),
        }
    }

    /// The text that failed to parse.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the failure.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Description of the unmet element.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Result type for calendrical operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_out_of_range_message() {
        let e = Error::out_of_range(Field::MonthOfYear, 13);
        assert_eq!(
            e.to_string(),
            "Invalid value for MonthOfYear: 13 (valid values 1 - 12)"
        );
    }

    #[test]
    fn invalid_for_context_is_distinct() {
        let range = Error::out_of_range(Field::DayOfMonth, 32);
        let context = Error::invalid(Field::DayOfMonth, 30, "February 2007 has 28 days");
        assert!(matches!(range, Error::FieldOutOfRange { .. }));
        assert!(matches!(context, Error::InvalidForContext { .. }));
        assert_ne!(range, context);
    }

    #[test]
    fn parse_error_message_carries_position() {
        let e = ParseError::new("2007-13", 5, "expected Value(MonthOfYear,2)");
        assert_eq!(e.index(), 5);
        assert_eq!(
            Error::Parse(e).to_string(),
            "Text '2007-13' could not be parsed at index 5: expected Value(MonthOfYear,2)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<Error>();
    }
}
