//! Canonical formatters and localized style factories.
//!
//! The ISO-8601 formatters are built once, on first use, and shared for the
//! life of the process. Letters in the ISO forms match case-insensitively,
//! so `2007-12-03t10:15:30z` is accepted; [`rfc_1123`] is case-sensitive.
//!
//! | Formatter | Example |
//! |---|---|
//! | [`iso_local_date`] | `2007-12-03` |
//! | [`iso_offset_date`] | `2007-12-03+01:00` |
//! | [`iso_date`] | `2007-12-03+01:00[Europe/Paris]` |
//! | [`iso_local_time`] | `10:15:30` |
//! | [`iso_offset_time`] | `10:15:30+01:00` |
//! | [`iso_time`] | `10:15:30+01:00[Europe/Paris]` |
//! | [`iso_local_date_time`] | `2007-12-03T10:15:30` |
//! | [`iso_offset_date_time`] | `2007-12-03T10:15:30+01:00` |
//! | [`iso_zoned_date_time`] | `2007-12-03T10:15:30+01:00[Europe/Paris]` |
//! | [`iso_date_time`] | `2007-12-03T10:15:30+01:00[Europe/Paris]` |
//! | [`iso_ordinal_date`] | `2007-337` |
//! | [`iso_week_date`] | `2007-W49-1` |
//! | [`basic_iso_date`] | `20071203+0100` |
//! | [`rfc_1123`] | `Mon, 03 Dec 2007 10:15:30 +0100` |
//!
//! In the `iso_date`, `iso_time`, `iso_date_time`, ordinal and week forms the
//! offset and the bracketed zone are optional when parsing.

use super::builder::FormatterBuilder;
use super::element::{Composite, Element, SignStyle};
use super::formatter::Formatter;
use super::locale::{FormatStyle, Locale, TextStyle};
use crate::calendar::Field;
use crate::common::Result;
use once_cell::sync::Lazy;
use tracing::debug;

struct Registry {
    iso_local_date: Formatter,
    iso_offset_date: Formatter,
    iso_date: Formatter,
    iso_local_time: Formatter,
    iso_offset_time: Formatter,
    iso_time: Formatter,
    iso_local_date_time: Formatter,
    iso_offset_date_time: Formatter,
    iso_zoned_date_time: Formatter,
    iso_date_time: Formatter,
    iso_ordinal_date: Formatter,
    iso_week_date: Formatter,
    basic_iso_date: Formatter,
    rfc_1123: Formatter,
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::build().expect("canonical formatter definitions are valid");
    debug!(formatters = Registry::COUNT, "canonical formatters published");
    registry
});

/// Append `[offset['[' zone ']']]`.
fn optional_offset_and_zone(builder: &mut FormatterBuilder) -> &mut FormatterBuilder {
    builder
        .optional_start()
        .append_offset_id()
        .optional_start()
        .append_char('[')
        .append_zone_id()
        .append_char(']')
}

impl Registry {
    const COUNT: usize = 14;

    fn build() -> Result<Self> {
        let iso_local_date = FormatterBuilder::new()
            .append_value_with(Field::Year, 4, 10, SignStyle::ExceedsPad)
            .append_char('-')
            .append_value_fixed(Field::MonthOfYear, 2)
            .append_char('-')
            .append_value_fixed(Field::DayOfMonth, 2)
            .to_formatter()?;

        let iso_offset_date = FormatterBuilder::new()
            .parse_case_insensitive()
            .append(&iso_local_date)
            .append_offset_id()
            .to_formatter()?;

        let iso_date = optional_offset_and_zone(
            FormatterBuilder::new()
                .parse_case_insensitive()
                .append(&iso_local_date),
        )
        .to_formatter()?;

        let iso_local_time = FormatterBuilder::new()
            .append_value_fixed(Field::HourOfDay, 2)
            .append_char(':')
            .append_value_fixed(Field::MinuteOfHour, 2)
            .optional_start()
            .append_char(':')
            .append_value_fixed(Field::SecondOfMinute, 2)
            .optional_start()
            .append_fraction(Field::NanoOfSecond, 0, 9)
            .to_formatter()?;

        let iso_offset_time = FormatterBuilder::new()
            .parse_case_insensitive()
            .append(&iso_local_time)
            .append_offset_id()
            .to_formatter()?;

        let iso_time = optional_offset_and_zone(
            FormatterBuilder::new()
                .parse_case_insensitive()
                .append(&iso_local_time),
        )
        .to_formatter()?;

        let iso_local_date_time = FormatterBuilder::new()
            .parse_case_insensitive()
            .append(&iso_local_date)
            .append_char('T')
            .append(&iso_local_time)
            .to_formatter()?;

        let iso_offset_date_time = FormatterBuilder::new()
            .append(&iso_local_date_time)
            .append_offset_id()
            .to_formatter()?;

        let iso_zoned_date_time = FormatterBuilder::new()
            .append(&iso_local_date_time)
            .append_offset_id()
            .append_char('[')
            .append_zone_id()
            .append_char(']')
            .to_formatter()?;

        let iso_date_time =
            optional_offset_and_zone(FormatterBuilder::new().append(&iso_local_date_time))
                .to_formatter()?;

        let iso_ordinal_date = optional_offset_and_zone(
            FormatterBuilder::new()
                .parse_case_insensitive()
                .append_value_with(Field::Year, 4, 10, SignStyle::ExceedsPad)
                .append_char('-')
                .append_value_fixed(Field::DayOfYear, 3),
        )
        .to_formatter()?;

        let iso_week_date = optional_offset_and_zone(
            FormatterBuilder::new()
                .parse_case_insensitive()
                .append_value_with(Field::WeekBasedYear, 4, 10, SignStyle::ExceedsPad)
                .append_literal("-W")
                .append_value_fixed(Field::WeekOfWeekBasedYear, 2)
                .append_char('-')
                .append_value_fixed(Field::DayOfWeek, 1),
        )
        .to_formatter()?;

        let basic_iso_date = FormatterBuilder::new()
            .parse_case_insensitive()
            .append_value_fixed(Field::Year, 4)
            .append_value_fixed(Field::MonthOfYear, 2)
            .append_value_fixed(Field::DayOfMonth, 2)
            .optional_start()
            .append_offset("Z", false, false)
            .optional_start()
            .append_char('[')
            .append_zone_id()
            .append_char(']')
            .to_formatter()?;

        let rfc_1123 = FormatterBuilder::new()
            .append_text(Field::DayOfWeek, TextStyle::Short)
            .append_literal(", ")
            .append_value_fixed(Field::DayOfMonth, 2)
            .append_char(' ')
            .append_text(Field::MonthOfYear, TextStyle::Short)
            .append_char(' ')
            .append_value_fixed(Field::Year, 4)
            .append_char(' ')
            .append_value_fixed(Field::HourOfDay, 2)
            .append_char(':')
            .append_value_fixed(Field::MinuteOfHour, 2)
            .append_char(':')
            .append_value_fixed(Field::SecondOfMinute, 2)
            .append_char(' ')
            .append_offset("Z", false, false)
            .to_formatter_with_locale(Locale::ENGLISH)?;

        Ok(Self {
            iso_local_date,
            iso_offset_date,
            iso_date,
            iso_local_time,
            iso_offset_time,
            iso_time,
            iso_local_date_time,
            iso_offset_date_time,
            iso_zoned_date_time,
            iso_date_time,
            iso_ordinal_date,
            iso_week_date,
            basic_iso_date,
            rfc_1123,
        })
    }
}

/// `2007-12-03`; years outside 0000-9999 carry a sign.
pub fn iso_local_date() -> &'static Formatter {
    &REGISTRY.iso_local_date
}

/// `2007-12-03+01:00`
pub fn iso_offset_date() -> &'static Formatter {
    &REGISTRY.iso_offset_date
}

/// Local date with optional offset and zone.
pub fn iso_date() -> &'static Formatter {
    &REGISTRY.iso_date
}

/// `10:15`, `10:15:30` or `10:15:30.5`.
///
/// Seconds always print; the fraction prints only when non-zero, with as
/// few digits as the value needs.
pub fn iso_local_time() -> &'static Formatter {
    &REGISTRY.iso_local_time
}

pub fn iso_offset_time() -> &'static Formatter {
    &REGISTRY.iso_offset_time
}

pub fn iso_time() -> &'static Formatter {
    &REGISTRY.iso_time
}

pub fn iso_local_date_time() -> &'static Formatter {
    &REGISTRY.iso_local_date_time
}

/// The text form of [`OffsetDateTime`](crate::OffsetDateTime).
pub fn iso_offset_date_time() -> &'static Formatter {
    &REGISTRY.iso_offset_date_time
}

/// Offset date-time followed by the bracketed zone id, both required.
pub fn iso_zoned_date_time() -> &'static Formatter {
    &REGISTRY.iso_zoned_date_time
}

pub fn iso_date_time() -> &'static Formatter {
    &REGISTRY.iso_date_time
}

/// `2007-337`
pub fn iso_ordinal_date() -> &'static Formatter {
    &REGISTRY.iso_ordinal_date
}

/// `2007-W49-1`, using the week-based year.
pub fn iso_week_date() -> &'static Formatter {
    &REGISTRY.iso_week_date
}

/// `20071203` with an optional `+0100` style offset; four-digit years only.
pub fn basic_iso_date() -> &'static Formatter {
    &REGISTRY.basic_iso_date
}

/// RFC 1123 date-time in English, `Tue, 03 Jun 2008 11:05:30 +0100`, with
/// `Z` for a zero offset. Parsing is case-sensitive.
pub fn rfc_1123() -> &'static Formatter {
    &REGISTRY.rfc_1123
}

fn localized(date: Option<FormatStyle>, time: Option<FormatStyle>, locale: Locale) -> Formatter {
    // at least one style is always present
    Formatter::new(Composite::new(vec![Element::Localized { date, time }], false), locale)
}

pub fn date(style: FormatStyle, locale: Locale) -> Formatter {
    localized(Some(style), None, locale)
}

pub fn time(style: FormatStyle, locale: Locale) -> Formatter {
    localized(None, Some(style), locale)
}

/// Date and time in the same style.
pub fn date_time(style: FormatStyle, locale: Locale) -> Formatter {
    localized(Some(style), Some(style), locale)
}

pub fn date_time_styles(
    date_style: FormatStyle,
    time_style: FormatStyle,
    locale: Locale,
) -> Formatter {
    localized(Some(date_style), Some(time_style), locale)
}

pub fn full_date(locale: Locale) -> Formatter {
    date(FormatStyle::Full, locale)
}

pub fn long_date(locale: Locale) -> Formatter {
    date(FormatStyle::Long, locale)
}

pub fn medium_date(locale: Locale) -> Formatter {
    date(FormatStyle::Medium, locale)
}

pub fn short_date(locale: Locale) -> Formatter {
    date(FormatStyle::Short, locale)
}

pub fn full_time(locale: Locale) -> Formatter {
    time(FormatStyle::Full, locale)
}

pub fn long_time(locale: Locale) -> Formatter {
    time(FormatStyle::Long, locale)
}

pub fn medium_time(locale: Locale) -> Formatter {
    time(FormatStyle::Medium, locale)
}

pub fn short_time(locale: Locale) -> Formatter {
    time(FormatStyle::Short, locale)
}

pub fn full_date_time(locale: Locale) -> Formatter {
    date_time(FormatStyle::Full, locale)
}

pub fn long_date_time(locale: Locale) -> Formatter {
    date_time(FormatStyle::Long, locale)
}

pub fn medium_date_time(locale: Locale) -> Formatter {
    date_time(FormatStyle::Medium, locale)
}

pub fn short_date_time(locale: Locale) -> Formatter {
    date_time(FormatStyle::Short, locale)
}
