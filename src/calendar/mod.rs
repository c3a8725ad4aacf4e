//! Offset-aware date-time values for the ISO calendar.
//!
//! The central type is [`OffsetDateTime`], a local date-time paired with a
//! fixed [`ZoneOffset`]. Local date and time parts are `chrono` values; this
//! module adds the field rules, instant conversion, period arithmetic and
//! zone resolution on top of them.
//!
//! # Quick Start
//!
//! ```rust
//! use calendrical::{OffsetDateTime, Period, ZoneOffset};
//!
//! let odt = OffsetDateTime::of_hms(2007, 1, 31, 10, 15, 30, ZoneOffset::of_hours(1)?)?;
//!
//! // Day-of-month overflow clamps to the last valid day
//! let next = odt.plus(&Period::of_months(1))?;
//! assert_eq!(next.to_string(), "2007-02-28T10:15:30+01:00");
//!
//! // Same instant, different offset
//! let utc = next.with_offset_same_instant(ZoneOffset::UTC)?;
//! assert_eq!(utc.to_string(), "2007-02-28T09:15:30Z");
//! # Ok::<(), calendrical::Error>(())
//! ```

// Submodule declarations
pub mod adjuster;
pub mod calendrical;
pub mod field;
pub mod instant;
pub mod local;
pub mod matcher;
pub mod offset;
pub mod offset_date;
pub mod offset_date_time;
pub mod offset_time;
pub mod period;
pub mod resolver;
pub mod zone;
pub mod zoned;

// Re-exports
pub use adjuster::{DateAdjuster, DateAdjusters, TimeAdjuster, TimeAdjusters};
pub use calendrical::Calendrical;
pub use field::{Field, MAX_YEAR, MIN_YEAR};
pub use instant::Instant;
pub use matcher::{CalendricalMatcher, CalendricalMatchers};
pub use offset::ZoneOffset;
pub use offset_date::OffsetDate;
pub use offset_date_time::OffsetDateTime;
pub use offset_time::OffsetTime;
pub use period::Period;
pub use resolver::{DateResolver, DateResolvers};
pub use zone::{LocalResolution, TimeZone, Transition, ZoneResolver, ZoneResolvers};
pub use zoned::ZonedDateTime;
