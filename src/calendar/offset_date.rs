//! Date with a fixed offset from UTC.

use super::field::Field;
use super::local::date_of;
use super::offset::ZoneOffset;
use super::offset_date_time::OffsetDateTime;
use super::offset_time::OffsetTime;
use crate::common::{Error, Result};
use crate::format::formatters;
use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use std::fmt;
use std::str::FromStr;

/// A date with an offset from UTC, such as `2007-12-03+01:00`.
///
/// This is the value the date-only offset formatters print and parse:
/// [`iso_offset_date`](formatters::iso_offset_date),
/// [`iso_date`](formatters::iso_date),
/// [`iso_ordinal_date`](formatters::iso_ordinal_date),
/// [`iso_week_date`](formatters::iso_week_date) and
/// [`basic_iso_date`](formatters::basic_iso_date).
///
/// ```
/// use calendrical::format::formatters;
/// use calendrical::{OffsetDate, ZoneOffset};
///
/// let date = OffsetDate::of(2007, 12, 3, ZoneOffset::of_hours(1)?)?;
/// assert_eq!(date.to_string(), "2007-12-03+01:00");
/// let week = formatters::iso_week_date().print(&date)?;
/// assert_eq!(week, "2007-W49-1+01:00[UTC+01:00]");
/// assert_eq!(formatters::iso_week_date().parse::<OffsetDate>(&week)?, date);
/// # Ok::<(), calendrical::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDate {
    date: NaiveDate,
    offset: ZoneOffset,
}

impl OffsetDate {
    /// # Errors
    ///
    /// [`Error::FieldOutOfRange`] for a component outside its absolute range,
    /// [`Error::InvalidForContext`] for a day that does not exist in the month.
    pub fn of(year: i32, month: u32, day: u32, offset: ZoneOffset) -> Result<Self> {
        let date = date_of(year as i64, month as i64, day as i64)?;
        Ok(Self { date, offset })
    }

    pub fn from_date(date: NaiveDate, offset: ZoneOffset) -> Result<Self> {
        Field::Year.check(date.year() as i64)?;
        Ok(Self { date, offset })
    }

    /// `date` must already be within the supported range.
    pub(crate) const fn from_parts(date: NaiveDate, offset: ZoneOffset) -> Self {
        Self { date, offset }
    }

    /// Parse ISO-8601 offset date text such as `2007-12-03+01:00`.
    pub fn parse(text: &str) -> Result<Self> {
        formatters::iso_offset_date().parse(text)
    }

    #[inline]
    pub fn offset(&self) -> ZoneOffset {
        self.offset
    }

    #[inline]
    pub fn local_date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    pub fn day_of_year(&self) -> u32 {
        self.date.ordinal()
    }

    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn with_offset_same_local(&self, offset: ZoneOffset) -> Self {
        Self {
            date: self.date,
            offset,
        }
    }

    /// Combine with a local time at this offset.
    pub fn at_time(&self, time: NaiveTime) -> Result<OffsetDateTime> {
        OffsetDateTime::from_date_time(self.date, time, self.offset)
    }

    /// Combine with an offset time, keeping the time's offset.
    pub fn at_offset_time(&self, time: &OffsetTime) -> Result<OffsetDateTime> {
        OffsetDateTime::from_date_time(self.date, time.local_time(), time.offset())
    }

    pub fn at_start_of_day(&self) -> Result<OffsetDateTime> {
        self.at_time(NaiveTime::MIN)
    }
}

impl fmt::Display for OffsetDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatters::iso_offset_date()
            .print_to(self, f)
            .map_err(|_| fmt::Error)
    }
}

impl FromStr for OffsetDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OffsetDate {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OffsetDate {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plus_one() -> ZoneOffset {
        ZoneOffset::of_hours(1).unwrap()
    }

    #[test]
    fn construction() {
        let date = OffsetDate::of(2008, 2, 29, plus_one()).unwrap();
        assert_eq!((date.year(), date.month(), date.day_of_month()), (2008, 2, 29));
        assert_eq!(date.day_of_year(), 60);
        assert_eq!(date.day_of_week(), Weekday::Fri);
        assert!(matches!(
            OffsetDate::of(2007, 2, 29, plus_one()),
            Err(Error::InvalidForContext { .. })
        ));
        assert!(matches!(
            OffsetDate::of(2007, 0, 1, plus_one()),
            Err(Error::FieldOutOfRange { .. })
        ));
    }

    #[test]
    fn text() {
        let date: OffsetDate = "2007-12-03-05:00".parse().unwrap();
        assert_eq!(date.offset(), ZoneOffset::of_hours(-5).unwrap());
        assert_eq!(date.to_string(), "2007-12-03-05:00");
        assert!(OffsetDate::parse("2007-12-03").is_err());
    }

    #[test]
    fn combining_with_times() {
        let date = OffsetDate::of(2007, 12, 3, plus_one()).unwrap();
        let time = OffsetTime::of(10, 15, 30, 0, ZoneOffset::UTC).unwrap();
        assert_eq!(date.at_offset_time(&time).unwrap().to_string(), "2007-12-03T10:15:30Z");
        assert_eq!(date.at_start_of_day().unwrap().to_string(), "2007-12-03T00:00:00+01:00");
        assert_eq!(
            date.at_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap()).unwrap().to_string(),
            "2007-12-03T09:00:00+01:00"
        );
    }
}
