//! Date and time adjusters.
//!
//! An adjuster maps one local value to another. Plain values act as
//! adjusters that replace the input, so `with_date_adjusted(some_date)` and
//! `with_date_adjusted(DateAdjusters::LastDayOfMonth)` go through the same
//! path.

use super::local::{date_of, days_in_month, plus_days, time_of};
use crate::common::Result;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

pub trait DateAdjuster {
    fn adjust_date(&self, date: NaiveDate) -> Result<NaiveDate>;
}

pub trait TimeAdjuster {
    fn adjust_time(&self, time: NaiveTime) -> Result<NaiveTime>;
}

impl DateAdjuster for NaiveDate {
    fn adjust_date(&self, _date: NaiveDate) -> Result<NaiveDate> {
        Ok(*self)
    }
}

impl TimeAdjuster for NaiveTime {
    fn adjust_time(&self, _time: NaiveTime) -> Result<NaiveTime> {
        Ok(*self)
    }
}

impl<A: DateAdjuster + ?Sized> DateAdjuster for &A {
    fn adjust_date(&self, date: NaiveDate) -> Result<NaiveDate> {
        (**self).adjust_date(date)
    }
}

impl<A: TimeAdjuster + ?Sized> TimeAdjuster for &A {
    fn adjust_time(&self, time: NaiveTime) -> Result<NaiveTime> {
        (**self).adjust_time(time)
    }
}

/// Common date adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateAdjusters {
    FirstDayOfMonth,
    LastDayOfMonth,
    FirstDayOfYear,
    LastDayOfYear,
    /// The given weekday, or the input when it already falls on it
    NextOrSame(Weekday),
    /// The given weekday strictly after the input
    Next(Weekday),
    PreviousOrSame(Weekday),
    Previous(Weekday),
}

impl DateAdjuster for DateAdjusters {
    fn adjust_date(&self, date: NaiveDate) -> Result<NaiveDate> {
        let year = date.year() as i64;
        match *self {
            Self::FirstDayOfMonth => date_of(year, date.month() as i64, 1),
            Self::LastDayOfMonth => date_of(
                year,
                date.month() as i64,
                days_in_month(date.year(), date.month()) as i64,
            ),
            Self::FirstDayOfYear => date_of(year, 1, 1),
            Self::LastDayOfYear => date_of(year, 12, 31),
            Self::NextOrSame(day) => plus_days(date, days_until(date.weekday(), day)),
            Self::Next(day) => match days_until(date.weekday(), day) {
                0 => plus_days(date, 7),
                n => plus_days(date, n),
            },
            Self::PreviousOrSame(day) => plus_days(date, -days_until(day, date.weekday())),
            Self::Previous(day) => match days_until(day, date.weekday()) {
                0 => plus_days(date, -7),
                n => plus_days(date, -n),
            },
        }
    }
}

fn days_until(from: Weekday, to: Weekday) -> i64 {
    (to.num_days_from_monday() as i64 - from.num_days_from_monday() as i64).rem_euclid(7)
}

/// Common time adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeAdjusters {
    Midnight,
    Noon,
    TruncateToHour,
    TruncateToMinute,
    TruncateToSecond,
}

impl TimeAdjuster for TimeAdjusters {
    fn adjust_time(&self, time: NaiveTime) -> Result<NaiveTime> {
        let (hour, minute, second) = match self {
            Self::Midnight => (0, 0, 0),
            Self::Noon => (12, 0, 0),
            Self::TruncateToHour => (time.hour(), 0, 0),
            Self::TruncateToMinute => (time.hour(), time.minute(), 0),
            Self::TruncateToSecond => (time.hour(), time.minute(), time.second()),
        };
        time_of(hour as i64, minute as i64, second as i64, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_and_year_bounds() {
        let d = date(2008, 2, 13);
        assert_eq!(DateAdjusters::FirstDayOfMonth.adjust_date(d), Ok(date(2008, 2, 1)));
        assert_eq!(DateAdjusters::LastDayOfMonth.adjust_date(d), Ok(date(2008, 2, 29)));
        assert_eq!(DateAdjusters::FirstDayOfYear.adjust_date(d), Ok(date(2008, 1, 1)));
        assert_eq!(DateAdjusters::LastDayOfYear.adjust_date(d), Ok(date(2008, 12, 31)));
    }

    #[test]
    fn weekdays() {
        // 2007-12-03 is a Monday
        let monday = date(2007, 12, 3);
        assert_eq!(DateAdjusters::NextOrSame(Weekday::Mon).adjust_date(monday), Ok(monday));
        assert_eq!(DateAdjusters::Next(Weekday::Mon).adjust_date(monday), Ok(date(2007, 12, 10)));
        let adjust = |adjuster: DateAdjusters| adjuster.adjust_date(monday);
        assert_eq!(adjust(DateAdjusters::NextOrSame(Weekday::Sun)), Ok(date(2007, 12, 9)));
        assert_eq!(adjust(DateAdjusters::PreviousOrSame(Weekday::Fri)), Ok(date(2007, 11, 30)));
        assert_eq!(adjust(DateAdjusters::Previous(Weekday::Mon)), Ok(date(2007, 11, 26)));
    }

    #[test]
    fn values_replace() {
        let other = date(2001, 1, 1);
        assert_eq!(other.adjust_date(date(2007, 12, 3)), Ok(other));
        let time = NaiveTime::from_hms_opt(10, 15, 30).unwrap();
        let hour = |h: u32| NaiveTime::from_hms_opt(h, 0, 0).unwrap();
        assert_eq!(TimeAdjusters::TruncateToHour.adjust_time(time), Ok(hour(10)));
        assert_eq!(TimeAdjusters::Noon.adjust_time(time), Ok(hour(12)));
    }
}
