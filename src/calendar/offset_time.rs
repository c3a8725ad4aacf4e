//! Time of day with a fixed offset from UTC.

use super::local::{nano_of_day, time_of, NANOS_PER_SECOND};
use super::offset::ZoneOffset;
use super::offset_date::OffsetDate;
use super::offset_date_time::OffsetDateTime;
use crate::common::{Error, Result};
use crate::format::formatters;
use chrono::{NaiveTime, Timelike};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A time with an offset from UTC, such as `10:15:30+01:00`.
///
/// Printed and parsed by [`iso_offset_time`](formatters::iso_offset_time)
/// and [`iso_time`](formatters::iso_time). Ordering compares the times as
/// if both were on the same UTC day, then the local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    time: NaiveTime,
    offset: ZoneOffset,
}

impl OffsetTime {
    pub fn of(hour: u32, minute: u32, second: u32, nano: u32, offset: ZoneOffset) -> Result<Self> {
        let time = time_of(hour as i64, minute as i64, second as i64, nano as i64)?;
        Ok(Self { time, offset })
    }

    /// Rejects `chrono` leap-second representations.
    pub fn from_time(time: NaiveTime, offset: ZoneOffset) -> Result<Self> {
        let time = time_of(
            time.hour() as i64,
            time.minute() as i64,
            time.second() as i64,
            time.nanosecond() as i64,
        )?;
        Ok(Self { time, offset })
    }

    /// `time` must already be within the supported range.
    pub(crate) const fn from_parts(time: NaiveTime, offset: ZoneOffset) -> Self {
        Self { time, offset }
    }

    /// Parse ISO-8601 offset time text such as `10:15:30+01:00`.
    pub fn parse(text: &str) -> Result<Self> {
        formatters::iso_offset_time().parse(text)
    }

    #[inline]
    pub fn offset(&self) -> ZoneOffset {
        self.offset
    }

    #[inline]
    pub fn local_time(&self) -> NaiveTime {
        self.time
    }

    pub fn hour(&self) -> u32 {
        self.time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.time.minute()
    }

    pub fn second(&self) -> u32 {
        self.time.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.time.nanosecond()
    }

    pub fn with_offset_same_local(&self, offset: ZoneOffset) -> Self {
        Self {
            time: self.time,
            offset,
        }
    }

    /// The same instant at another offset; the time wraps around midnight.
    pub fn with_offset_same_instant(&self, offset: ZoneOffset) -> Self {
        let difference = offset.total_seconds() as i64 - self.offset.total_seconds() as i64;
        let (time, _) = self
            .time
            .overflowing_add_signed(chrono::TimeDelta::seconds(difference));
        Self { time, offset }
    }

    pub fn at_date(&self, date: &OffsetDate) -> Result<OffsetDateTime> {
        OffsetDateTime::from_date_time(date.local_date(), self.time, self.offset)
    }

    fn utc_nano_of_day(&self) -> i64 {
        nano_of_day(self.time) - self.offset.total_seconds() as i64 * NANOS_PER_SECOND
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.utc_nano_of_day() < other.utc_nano_of_day()
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.utc_nano_of_day() > other.utc_nano_of_day()
    }
}

impl Ord for OffsetTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc_nano_of_day()
            .cmp(&other.utc_nano_of_day())
            .then_with(|| self.time.cmp(&other.time))
    }
}

impl PartialOrd for OffsetTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OffsetTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatters::iso_offset_time()
            .print_to(self, f)
            .map_err(|_| fmt::Error)
    }
}

impl FromStr for OffsetTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OffsetTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OffsetTime {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let text = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}
