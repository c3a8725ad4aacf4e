//! Calendrical - offset-aware ISO-8601 date-times for Rust
//!
//! This library provides an immutable date-time carrying a fixed UTC offset,
//! and a composable engine for printing and parsing date-time text.
//!
//! # Features
//!
//! - **OffsetDateTime**: Local date-time plus offset, with field access,
//!   period arithmetic, adjusters and instant conversion
//! - **OffsetDate / OffsetTime**: The date or time half of an offset
//!   date-time, for the date-only and time-only formatters
//! - **Zones**: Fixed offsets and, with the `tzdb` feature, IANA regions with
//!   explicit gap/overlap resolution
//! - **Canonical formatters**: ISO-8601 local/offset/zoned, ordinal, week and
//!   basic forms plus RFC 1123
//! - **Builder and patterns**: Compose formatters from fields, literals,
//!   optional sections and locale text
//! - **Localized styles**: Full, long, medium and short date/time patterns
//!   for a built-in locale table or a custom [`LocaleProvider`]
//!
//! # Example - Values and arithmetic
//!
//! ```rust
//! use calendrical::{OffsetDateTime, Period, ZoneOffset};
//!
//! let odt = OffsetDateTime::parse("2007-12-03T10:15:30+01:00")?;
//! let later = odt.plus(&Period::of_months(2).with_hours(3))?;
//! assert_eq!(later.to_string(), "2008-02-03T13:15:30+01:00");
//!
//! let utc = later.with_offset_same_instant(ZoneOffset::UTC)?;
//! assert!(utc.equal_instant(&later));
//! # Ok::<(), calendrical::Error>(())
//! ```
//!
//! # Example - Formatting and parsing
//!
//! ```rust
//! use calendrical::format::{FormatterBuilder, formatters};
//! use calendrical::{Locale, OffsetDateTime};
//!
//! let rfc = "Mon, 03 Dec 2007 10:15:30 +0100";
//! let odt: OffsetDateTime = formatters::rfc_1123().parse(rfc)?;
//! assert_eq!(formatters::iso_ordinal_date().print(&odt)?, "2007-337+01:00[UTC+01:00]");
//!
//! let custom = FormatterBuilder::new()
//!     .append_pattern("EEEE d MMMM yyyy[ HH:mm]")
//!     .to_formatter_with_locale(Locale::GERMAN)?;
//! assert_eq!(custom.print(&odt)?, "Montag 3 Dezember 2007 10:15");
//! # Ok::<(), calendrical::Error>(())
//! ```
//!
//! # Example - Errors
//!
//! ```rust
//! use calendrical::{Error, OffsetDateTime};
//!
//! match OffsetDateTime::parse("2007-12-03T10:15:30") {
//!     Err(Error::Parse(err)) => assert_eq!(err.index(), 19),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

/// Date-time values, offsets, zones and calendar field rules
///
/// Local dates and times are `chrono` values; this module adds the
/// offset-aware [`OffsetDateTime`] and everything needed to build and adjust it.
pub mod calendar;

/// Shared error type and checked arithmetic
pub mod common;

/// Formatter engine: builder, pattern compiler, canonical formatters and locales
pub mod format;

// Re-export commonly used types for convenience
pub use calendar::{
    Calendrical, CalendricalMatcher, CalendricalMatchers, DateAdjuster, DateAdjusters, DateResolver,
    DateResolvers, Field, Instant, LocalResolution, OffsetDate, OffsetDateTime, OffsetTime, Period,
    TimeAdjuster, TimeAdjusters, TimeZone, Transition, ZoneOffset, ZoneResolver, ZoneResolvers,
    ZonedDateTime,
};
pub use common::{Error, ParseError, Result};
pub use format::{
    FormatStyle, Formatter, FormatterBuilder, Locale, LocaleProvider, Parsed, SignStyle, TextStyle,
};
