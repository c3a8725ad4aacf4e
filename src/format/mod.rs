//! Text formatting and parsing of calendrical values.
//!
//! Formatters are composed from a small set of elements: literals, numeric
//! fields with width and sign rules, fractions, locale text, offsets, zone
//! ids, optional sections and locale-dependent styles. [`FormatterBuilder`]
//! assembles them; [`formatters`] holds the canonical ISO-8601 and RFC 1123
//! definitions built the same way.
//!
//! Printing reads fields through [`Calendrical`](crate::calendar::Calendrical).
//! Parsing collects fields into [`Parsed`] and then resolves them into the
//! requested type through [`FromParsed`]:
//!
//! ```rust
//! use calendrical::format::formatters;
//! use calendrical::ZonedDateTime;
//! use chrono::NaiveDate;
//!
//! let date: NaiveDate = formatters::iso_week_date().parse("2007-W49-1")?;
//! assert_eq!(formatters::iso_local_date().print(&date)?, "2007-12-03");
//!
//! let text = "2007-12-03T10:15:30+01:00[UTC+01:00]";
//! let zoned: ZonedDateTime = formatters::iso_zoned_date_time().parse(text)?;
//! assert_eq!(zoned.offset().total_seconds(), 3600);
//! # Ok::<(), calendrical::Error>(())
//! ```
//!
//! # Pattern letters
//!
//! [`FormatterBuilder::append_pattern`] and the locale style patterns use
//! these letters. Text in single quotes is literal, `''` is a quote, and
//! `[` `]` delimit an optional section. Other non-letter characters are
//! literals.
//!
//! | Letter | Field | Forms |
//! |---|---|---|
//! | `y` / `Y` | year / week-based year | `y` any width, `yy` two digits from 2000, `yyyy` padded |
//! | `M` | month | `M`, `MM`, `MMM` short text, `MMMM` full text |
//! | `d` | day of month | `d`, `dd` |
//! | `D` | day of year | `D`, `DD`, `DDD` |
//! | `w` | week of week-based year | `w`, `ww` |
//! | `e` / `E` | day of week | `e` number, `E`-`EEE` short text, `EEEE` full text |
//! | `a` | AM/PM | text |
//! | `H` `k` `K` `h` | hour 0-23, 1-24, 0-11, 1-12 | one or two digits |
//! | `m` `s` | minute, second | one or two digits |
//! | `S` | fraction of second | one digit per letter, no point |
//! | `n` | nanosecond | up to nine digits |
//! | `Z` | offset | `+0100`, `ZZ` `+01:00`, `ZZZ` offset id |
//! | `z` | zone id | `Europe/Paris`, `UTC+01:00` |

// Submodule declarations
pub mod builder;
pub mod context;
pub mod element;
pub mod formatter;
pub mod formatters;
pub mod locale;
mod pattern;

#[cfg(test)]
mod tests;

// Re-exports
pub use builder::FormatterBuilder;
pub use context::{FromParsed, Parsed};
pub use element::SignStyle;
pub use formatter::Formatter;
pub use locale::{BuiltinLocales, FormatStyle, Locale, LocaleData, LocaleProvider, TextStyle};
