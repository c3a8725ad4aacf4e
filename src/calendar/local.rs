//! Local date and time arithmetic.
//!
//! Thin helpers over `chrono` that convert between calendar dates and the
//! epoch-day count, carry time overflow into days, and validate component
//! values with the crate's error taxonomy.

use super::field::{Field, MAX_YEAR, MIN_YEAR};
use super::resolver::DateResolver;
use crate::common::math::{floor_div, floor_mod, safe_add};
use crate::common::{Error, Result};
use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const SECONDS_PER_DAY: i64 = 86_400;
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub const NANOS_PER_DAY: i64 = SECONDS_PER_DAY * NANOS_PER_SECOND;

/// `NaiveDate::num_days_from_ce` of 1970-01-01.
const DAYS_0001_TO_1970: i64 = 719_163;

/// Days since 1970-01-01, negative before it.
#[inline]
pub fn epoch_day(date: NaiveDate) -> i64 {
    date.num_days_from_ce() as i64 - DAYS_0001_TO_1970
}

/// Inverse of [`epoch_day`].
pub fn date_from_epoch_day(epoch_day: i64) -> Result<NaiveDate> {
    let date = epoch_day
        .checked_add(DAYS_0001_TO_1970)
        .and_then(|days| i32::try_from(days).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| {
            Error::overflow(format!("epoch day {epoch_day} is outside the supported range"))
        })?;
    check_year_span(date.year() as i64)?;
    Ok(date)
}

#[inline]
pub fn second_of_day(time: NaiveTime) -> i64 {
    time.num_seconds_from_midnight() as i64
}

#[inline]
pub fn nano_of_day(time: NaiveTime) -> i64 {
    second_of_day(time) * NANOS_PER_SECOND + (time.nanosecond() as i64 % NANOS_PER_SECOND)
}

/// Build a time from a second-of-day in `[0, 86400)` and a nanosecond.
pub fn time_from_second_of_day(second_of_day: i64, nano: u32) -> Result<NaiveTime> {
    let secs = u32::try_from(second_of_day)
        .map_err(|_| Error::out_of_range(Field::SecondOfMinute, second_of_day))?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, nano)
        .ok_or_else(|| Error::out_of_range(Field::NanoOfSecond, nano as i64))
}

fn time_from_nano_of_day(nano_of_day: i64) -> Result<NaiveTime> {
    time_from_second_of_day(
        nano_of_day / NANOS_PER_SECOND,
        (nano_of_day % NANOS_PER_SECOND) as u32,
    )
}

/// Year check for the result of a calculation.
pub fn check_year_span(year: i64) -> Result<i32> {
    if (MIN_YEAR as i64..=MAX_YEAR as i64).contains(&year) {
        Ok(year as i32)
    } else {
        Err(Error::overflow(format!(
            "year {} is outside the supported range {} to {}",
            year, MIN_YEAR, MAX_YEAR
        )))
    }
}

#[inline]
pub fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("?")
}

/// Validate and build a date from year, month and day.
///
/// # Errors
///
/// [`Error::FieldOutOfRange`] when a component is outside its absolute range,
/// [`Error::InvalidForContext`] when the day does not exist in that month.
pub fn date_of(year: i64, month: i64, day: i64) -> Result<NaiveDate> {
    let year = Field::Year.check_i32(year)?;
    let month = Field::MonthOfYear.check_u32(month)?;
    let day = Field::DayOfMonth.check_u32(day)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        let reason = if month == 2 && day == 29 {
            format!("{} is not a leap year", year)
        } else {
            format!(
                "{} {} has {} days",
                month_name(month),
                year,
                days_in_month(year, month)
            )
        };
        Error::invalid(Field::DayOfMonth, day as i64, reason)
    })
}

/// Validate and build a time of day.
pub fn time_of(hour: i64, minute: i64, second: i64, nano: i64) -> Result<NaiveTime> {
    let hour = Field::HourOfDay.check_u32(hour)?;
    let minute = Field::MinuteOfHour.check_u32(minute)?;
    let second = Field::SecondOfMinute.check_u32(second)?;
    let nano = Field::NanoOfSecond.check_u32(nano)?;
    NaiveTime::from_hms_nano_opt(hour, minute, second, nano)
        .ok_or_else(|| Error::invalid(Field::HourOfDay, hour as i64, "not a valid time"))
}

pub fn plus_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    if days == 0 {
        return Ok(date);
    }
    date_from_epoch_day(safe_add(epoch_day(date), days)?)
}

pub fn plus_months(date: NaiveDate, months: i64, resolver: &dyn DateResolver) -> Result<NaiveDate> {
    if months == 0 {
        return Ok(date);
    }
    let count = safe_add(date.year() as i64 * 12 + date.month0() as i64, months)?;
    let year = check_year_span(floor_div(count, 12))?;
    let month = (floor_mod(count, 12) + 1) as u32;
    resolver.resolve(year, month, date.day())
}

pub fn plus_years(date: NaiveDate, years: i64, resolver: &dyn DateResolver) -> Result<NaiveDate> {
    if years == 0 {
        return Ok(date);
    }
    let year = check_year_span(safe_add(date.year() as i64, years)?)?;
    resolver.resolve(year, date.month(), date.day())
}

/// Add a time amount, carrying whole days into the date.
pub fn plus_time(
    date_time: NaiveDateTime,
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanos: i64,
) -> Result<NaiveDateTime> {
    if hours == 0 && minutes == 0 && seconds == 0 && nanos == 0 {
        return Ok(date_time);
    }
    let nanos_per_second = NANOS_PER_SECOND as i128;
    let total = hours as i128 * 3600 * nanos_per_second
        + minutes as i128 * 60 * nanos_per_second
        + seconds as i128 * nanos_per_second
        + nanos as i128
        + nano_of_day(date_time.time()) as i128;
    let carry = i64::try_from(total.div_euclid(NANOS_PER_DAY as i128))
        .map_err(|_| Error::overflow("time amount exceeds the supported range"))?;
    let nano_of_day = total.rem_euclid(NANOS_PER_DAY as i128) as i64;
    let date = plus_days(date_time.date(), carry)?;
    Ok(date.and_time(time_from_nano_of_day(nano_of_day)?))
}

#[inline]
pub fn plus_seconds(date_time: NaiveDateTime, seconds: i64) -> Result<NaiveDateTime> {
    plus_time(date_time, 0, 0, seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::resolver::DateResolvers;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_day_round_trip() {
        assert_eq!(epoch_day(date(1970, 1, 1)), 0);
        assert_eq!(epoch_day(date(1969, 12, 31)), -1);
        assert_eq!(epoch_day(date(2000, 3, 1)), 11_017);
        for day in [-800_000, -1, 0, 1, 13_850, 2_932_896] {
            assert_eq!(epoch_day(date_from_epoch_day(day).unwrap()), day);
        }
    }

    #[test]
    fn epoch_day_out_of_range() {
        assert!(matches!(
            date_from_epoch_day(i64::MAX),
            Err(Error::ArithmeticRange(_))
        ));
    }

    #[test]
    fn date_of_distinguishes_failures() {
        assert_eq!(date_of(2007, 12, 3), Ok(date(2007, 12, 3)));
        assert!(matches!(date_of(2007, 13, 1), Err(Error::FieldOutOfRange { .. })));
        assert!(matches!(date_of(2007, 2, 30), Err(Error::InvalidForContext { .. })));
        assert!(matches!(date_of(2007, 2, 29), Err(Error::InvalidForContext { .. })));
        assert!(date_of(2008, 2, 29).is_ok());
    }

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(-4));
        assert!(is_leap_year(0));
        assert_eq!(days_in_month(2007, 2), 28);
        assert_eq!(days_in_month(2008, 2), 29);
        assert_eq!(days_in_month(2008, 9), 30);
    }

    #[test]
    fn month_arithmetic_clamps_by_default() {
        let resolver = DateResolvers::PreviousValid;
        assert_eq!(plus_months(date(2007, 1, 31), 1, &resolver), Ok(date(2007, 2, 28)));
        assert_eq!(plus_months(date(2007, 1, 31), -2, &resolver), Ok(date(2006, 11, 30)));
        assert_eq!(plus_years(date(2008, 2, 29), 1, &resolver), Ok(date(2009, 2, 28)));
        assert!(matches!(
            plus_years(date(2008, 1, 1), i64::from(MAX_YEAR), &resolver),
            Err(Error::ArithmeticRange(_))
        ));
    }

    #[test]
    fn time_carry_crosses_midnight_both_ways() {
        let dt = date(2007, 12, 31).and_hms_opt(23, 59, 30).unwrap();
        assert_eq!(
            plus_seconds(dt, 45).unwrap(),
            date(2008, 1, 1).and_hms_opt(0, 0, 15).unwrap()
        );
        let dt = date(1970, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(
            plus_time(dt, 0, 0, 0, -1).unwrap(),
            date(1969, 12, 31).and_hms_nano_opt(23, 59, 59, 999_999_999).unwrap()
        );
    }
}
