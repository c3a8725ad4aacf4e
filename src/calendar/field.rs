//! Calendar field rules for the ISO calendar.
//!
//! A [`Field`] identifies one calendrical quantity (year, month-of-year, ...)
//! together with its absolute value range. Month lengths and leap years come
//! from `chrono`; this module only knows the bounds that hold regardless of
//! context.

use crate::common::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use std::fmt;

/// Smallest supported year.
pub const MIN_YEAR: i32 = -262_143;
/// Largest supported year.
pub const MAX_YEAR: i32 = 262_142;

/// Maximum absolute offset from UTC, in seconds (18 hours).
pub const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// Identifier of a calendrical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Proleptic year, zero and negative years allowed
    Year,
    /// Month of year, 1 (January) to 12
    MonthOfYear,
    /// Day of month, 1 to 31
    DayOfMonth,
    /// Day of year, 1 to 366
    DayOfYear,
    /// ISO day of week, 1 (Monday) to 7 (Sunday)
    DayOfWeek,
    /// Year of the ISO week-based calendar
    WeekBasedYear,
    /// ISO week of the week-based year, 1 to 53
    WeekOfWeekBasedYear,
    /// 0 for AM, 1 for PM
    AmPmOfDay,
    /// Clock hour within AM/PM, 1 to 12
    ClockHourOfAmPm,
    /// Hour within AM/PM, 0 to 11
    HourOfAmPm,
    /// Hour of day, 0 to 23
    HourOfDay,
    /// Clock hour of day, 1 to 24
    ClockHourOfDay,
    /// Minute of hour, 0 to 59
    MinuteOfHour,
    /// Second of minute, 0 to 59
    SecondOfMinute,
    /// Nanosecond of second, 0 to 999,999,999
    NanoOfSecond,
    /// Total offset from UTC in seconds
    OffsetSeconds,
}

impl Field {
    pub const ALL: [Field; 16] = [
        Self::Year,
        Self::MonthOfYear,
        Self::DayOfMonth,
        Self::DayOfYear,
        Self::DayOfWeek,
        Self::WeekBasedYear,
        Self::WeekOfWeekBasedYear,
        Self::AmPmOfDay,
        Self::ClockHourOfAmPm,
        Self::HourOfAmPm,
        Self::HourOfDay,
        Self::ClockHourOfDay,
        Self::MinuteOfHour,
        Self::SecondOfMinute,
        Self::NanoOfSecond,
        Self::OffsetSeconds,
    ];

    /// Get the field name
    pub fn name(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::MonthOfYear => "MonthOfYear",
            Self::DayOfMonth => "DayOfMonth",
            Self::DayOfYear => "DayOfYear",
            Self::DayOfWeek => "DayOfWeek",
            Self::WeekBasedYear => "WeekBasedYear",
            Self::WeekOfWeekBasedYear => "WeekOfWeekBasedYear",
            Self::AmPmOfDay => "AmPmOfDay",
            Self::ClockHourOfAmPm => "ClockHourOfAmPm",
            Self::HourOfAmPm => "HourOfAmPm",
            Self::HourOfDay => "HourOfDay",
            Self::ClockHourOfDay => "ClockHourOfDay",
            Self::MinuteOfHour => "MinuteOfHour",
            Self::SecondOfMinute => "SecondOfMinute",
            Self::NanoOfSecond => "NanoOfSecond",
            Self::OffsetSeconds => "OffsetSeconds",
        }
    }

    /// Absolute inclusive bounds of the field.
    pub fn range(self) -> (i64, i64) {
        match self {
            Self::Year | Self::WeekBasedYear => (MIN_YEAR as i64, MAX_YEAR as i64),
            Self::MonthOfYear => (1, 12),
            Self::DayOfMonth => (1, 31),
            Self::DayOfYear => (1, 366),
            Self::DayOfWeek => (1, 7),
            Self::WeekOfWeekBasedYear => (1, 53),
            Self::AmPmOfDay => (0, 1),
            Self::ClockHourOfAmPm => (1, 12),
            Self::HourOfAmPm => (0, 11),
            Self::HourOfDay => (0, 23),
            Self::ClockHourOfDay => (1, 24),
            Self::MinuteOfHour | Self::SecondOfMinute => (0, 59),
            Self::NanoOfSecond => (0, 999_999_999),
            Self::OffsetSeconds => (-(MAX_OFFSET_SECONDS as i64), MAX_OFFSET_SECONDS as i64),
        }
    }

    #[inline]
    pub fn min(self) -> i64 {
        self.range().0
    }

    #[inline]
    pub fn max(self) -> i64 {
        self.range().1
    }

    /// Whether the field belongs to the date part of a date-time.
    pub fn is_date_field(self) -> bool {
        matches!(
            self,
            Self::Year
                | Self::MonthOfYear
                | Self::DayOfMonth
                | Self::DayOfYear
                | Self::DayOfWeek
                | Self::WeekBasedYear
                | Self::WeekOfWeekBasedYear
        )
    }

    /// Whether the field belongs to the time part of a date-time.
    pub fn is_time_field(self) -> bool {
        !self.is_date_field() && self != Self::OffsetSeconds
    }

    /// Check that `value` lies within the absolute range of the field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOutOfRange`] when it does not.
    pub fn check(self, value: i64) -> Result<i64> {
        let (min, max) = self.range();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(Error::out_of_range(self, value))
        }
    }

    /// Range-check and narrow to `i32`.
    pub fn check_i32(self, value: i64) -> Result<i32> {
        // every field range fits in an i32
        self.check(value).map(|v| v as i32)
    }

    /// Range-check and narrow to `u32`; only valid for non-negative fields.
    pub fn check_u32(self, value: i64) -> Result<u32> {
        let v = self.check(value)?;
        u32::try_from(v).map_err(|_| Error::out_of_range(self, value))
    }

    /// Derive the field value from a local date, if it is a date field.
    pub fn get_from_date(self, date: &NaiveDate) -> Option<i64> {
        let value = match self {
            Self::Year => date.year() as i64,
            Self::MonthOfYear => date.month() as i64,
            Self::DayOfMonth => date.day() as i64,
            Self::DayOfYear => date.ordinal() as i64,
            Self::DayOfWeek => date.weekday().number_from_monday() as i64,
            Self::WeekBasedYear => date.iso_week().year() as i64,
            Self::WeekOfWeekBasedYear => date.iso_week().week() as i64,
            _ => return None,
        };
        Some(value)
    }

    /// Derive the field value from a local time, if it is a time field.
    pub fn get_from_time(self, time: &NaiveTime) -> Option<i64> {
        let hour = time.hour() as i64;
        let value = match self {
            Self::AmPmOfDay => hour / 12,
            Self::ClockHourOfAmPm => match hour % 12 {
                0 => 12,
                h => h,
            },
            Self::HourOfAmPm => hour % 12,
            Self::HourOfDay => hour,
            Self::ClockHourOfDay => match hour {
                0 => 24,
                h => h,
            },
            Self::MinuteOfHour => time.minute() as i64,
            Self::SecondOfMinute => time.second() as i64,
            // chrono folds a leap second into the nanosecond value
            Self::NanoOfSecond => (time.nanosecond() % 1_000_000_000) as i64,
            _ => return None,
        };
        Some(value)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
