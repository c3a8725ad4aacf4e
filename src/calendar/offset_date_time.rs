//! Date-time with a fixed offset from UTC.

use super::adjuster::{DateAdjuster, TimeAdjuster};
use super::field::Field;
use super::instant::Instant;
use super::local::{
    self, date_from_epoch_day, date_of, epoch_day, second_of_day, time_from_second_of_day, time_of,
    SECONDS_PER_DAY,
};
use super::matcher::CalendricalMatcher;
use super::offset::ZoneOffset;
use super::offset_date::OffsetDate;
use super::offset_time::OffsetTime;
use super::period::Period;
use super::resolver::{DateResolver, DateResolvers};
use super::zone::{TimeZone, ZoneResolver, ZoneResolvers};
use super::zoned::ZonedDateTime;
use crate::common::math::{floor_div, floor_mod, safe_add, safe_mul, safe_neg};
use crate::common::{Error, Result};
use crate::format::formatters;
use chrono::{Datelike, Month, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A date-time with an offset from UTC, such as `2007-12-03T10:15:30+01:00`.
///
/// The value stores the local date-time exactly as given together with the
/// offset. Two values are equal only when both parts match; use
/// [`equal_instant`](Self::equal_instant) to compare points on the time-line.
/// Ordering is by instant first and by local date-time second, which keeps it
/// consistent with equality.
///
/// All operations return new values.
///
/// # Examples
///
/// ```
/// use calendrical::{OffsetDateTime, ZoneOffset};
///
/// let odt: OffsetDateTime = "2007-12-03T10:15:30+01:00".parse().unwrap();
/// assert_eq!(odt.hour(), 10);
/// assert_eq!(odt.offset(), ZoneOffset::of_hours(1).unwrap());
///
/// let utc = odt.with_offset_same_instant(ZoneOffset::UTC).unwrap();
/// assert_eq!(utc.to_string(), "2007-12-03T09:15:30Z");
/// assert!(utc.equal_instant(&odt));
/// assert_ne!(utc, odt);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetDateTime {
    date_time: NaiveDateTime,
    offset: ZoneOffset,
}

impl OffsetDateTime {
    /// Create a value from calendar and clock components.
    ///
    /// # Errors
    ///
    /// [`Error::FieldOutOfRange`] for a component outside its absolute range,
    /// [`Error::InvalidForContext`] for a day that does not exist in the month.
    #[allow(clippy::too_many_arguments)]
    pub fn of(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        nano: u32,
        offset: ZoneOffset,
    ) -> Result<Self> {
        let date = date_of(year as i64, month as i64, day as i64)?;
        let time = time_of(hour as i64, minute as i64, second as i64, nano as i64)?;
        Ok(Self {
            date_time: date.and_time(time),
            offset,
        })
    }

    pub fn of_hm(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        offset: ZoneOffset,
    ) -> Result<Self> {
        Self::of(year, month, day, hour, minute, 0, 0, offset)
    }

    pub fn of_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        offset: ZoneOffset,
    ) -> Result<Self> {
        Self::of(year, month, day, hour, minute, second, 0, offset)
    }

    /// Start of the given day.
    pub fn midnight(year: i32, month: u32, day: u32, offset: ZoneOffset) -> Result<Self> {
        Self::of(year, month, day, 0, 0, 0, 0, offset)
    }

    pub fn from_date_time(date: NaiveDate, time: NaiveTime, offset: ZoneOffset) -> Result<Self> {
        Self::from_local(date.and_time(time), offset)
    }

    /// Attach `offset` to a local date-time.
    ///
    /// Rejects years outside the supported span and `chrono` leap-second
    /// representations.
    pub fn from_local(date_time: NaiveDateTime, offset: ZoneOffset) -> Result<Self> {
        Field::Year.check(date_time.year() as i64)?;
        Field::NanoOfSecond.check(date_time.nanosecond() as i64)?;
        Ok(Self { date_time, offset })
    }

    /// The local date-time of `instant` as seen at `offset`.
    pub fn from_instant(instant: Instant, offset: ZoneOffset) -> Result<Self> {
        let adjusted = safe_add(instant.epoch_seconds(), offset.total_seconds() as i64)?;
        let day = floor_div(adjusted, SECONDS_PER_DAY);
        let second_of_day = floor_mod(adjusted, SECONDS_PER_DAY);
        let date = date_from_epoch_day(day)?;
        let time = time_from_second_of_day(second_of_day, instant.nanos())?;
        Ok(Self {
            date_time: date.and_time(time),
            offset,
        })
    }

    /// From seconds since the epoch plus a signed nanosecond adjustment.
    pub fn from_epoch_seconds(
        seconds: i64,
        nano_adjustment: i64,
        offset: ZoneOffset,
    ) -> Result<Self> {
        let instant = Instant::of_epoch_seconds_adjusted(seconds, nano_adjustment)?;
        Self::from_instant(instant, offset)
    }

    /// Parse ISO-8601 offset date-time text such as `2007-12-03T10:15:30+01:00`.
    pub fn parse(text: &str) -> Result<Self> {
        formatters::iso_offset_date_time().parse(text)
    }

    #[inline]
    pub fn offset(&self) -> ZoneOffset {
        self.offset
    }

    #[inline]
    pub fn local_date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    #[inline]
    pub fn local_date(&self) -> NaiveDate {
        self.date_time.date()
    }

    #[inline]
    pub fn local_time(&self) -> NaiveTime {
        self.date_time.time()
    }

    /// The date half, keeping the offset.
    pub fn to_offset_date(&self) -> OffsetDate {
        OffsetDate::from_parts(self.local_date(), self.offset)
    }

    /// The time half, keeping the offset.
    pub fn to_offset_time(&self) -> OffsetTime {
        OffsetTime::from_parts(self.local_time(), self.offset)
    }

    pub fn year(&self) -> i32 {
        self.date_time.year()
    }

    /// Month number, 1 to 12.
    pub fn month(&self) -> u32 {
        self.date_time.month()
    }

    pub fn month_of_year(&self) -> Month {
        match self.date_time.month() {
            1 => Month::January,
            2 => Month::February,
            3 => Month::March,
            4 => Month::April,
            5 => Month::May,
            6 => Month::June,
            7 => Month::July,
            8 => Month::August,
            9 => Month::September,
            10 => Month::October,
            11 => Month::November,
            _ => Month::December,
        }
    }

    pub fn day_of_month(&self) -> u32 {
        self.date_time.day()
    }

    pub fn day_of_year(&self) -> u32 {
        self.date_time.ordinal()
    }

    pub fn day_of_week(&self) -> Weekday {
        self.date_time.weekday()
    }

    pub fn hour(&self) -> u32 {
        self.date_time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.date_time.minute()
    }

    pub fn second(&self) -> u32 {
        self.date_time.second()
    }

    pub fn nanosecond(&self) -> u32 {
        self.date_time.nanosecond()
    }

    pub fn is_leap_year(&self) -> bool {
        local::is_leap_year(self.year())
    }

    pub fn year_length(&self) -> u32 {
        if self.is_leap_year() { 366 } else { 365 }
    }

    /// Seconds from 1970-01-01T00:00Z to this date-time, ignoring the nanosecond.
    pub fn to_epoch_seconds(&self) -> i64 {
        epoch_day(self.local_date()) * SECONDS_PER_DAY + second_of_day(self.local_time())
            - self.offset.total_seconds() as i64
    }

    pub fn to_instant(&self) -> Instant {
        Instant::from_parts(self.to_epoch_seconds(), self.nanosecond())
    }

    /// Change the year, clamping February 29 to the 28th in common years.
    pub fn with_year(&self, year: i32) -> Result<Self> {
        self.with_year_resolved(year, &DateResolvers::PreviousValid)
    }

    pub fn with_year_resolved(&self, year: i32, resolver: &dyn DateResolver) -> Result<Self> {
        let year = Field::Year.check_i32(year as i64)?;
        let date = resolver.resolve(year, self.month(), self.day_of_month())?;
        Ok(self.with_local_date(date))
    }

    /// Change the month, clamping the day to the last day of the new month.
    pub fn with_month(&self, month: u32) -> Result<Self> {
        self.with_month_resolved(month, &DateResolvers::PreviousValid)
    }

    pub fn with_month_resolved(&self, month: u32, resolver: &dyn DateResolver) -> Result<Self> {
        let month = Field::MonthOfYear.check_u32(month as i64)?;
        let date = resolver.resolve(self.year(), month, self.day_of_month())?;
        Ok(self.with_local_date(date))
    }

    /// Change the day of month; fails if the day does not exist in the month.
    pub fn with_day_of_month(&self, day: u32) -> Result<Self> {
        let date = date_of(self.year() as i64, self.month() as i64, day as i64)?;
        Ok(self.with_local_date(date))
    }

    pub fn with_day_of_month_resolved(
        &self,
        day: u32,
        resolver: &dyn DateResolver,
    ) -> Result<Self> {
        let day = Field::DayOfMonth.check_u32(day as i64)?;
        let date = resolver.resolve(self.year(), self.month(), day)?;
        Ok(self.with_local_date(date))
    }

    pub fn with_day_of_year(&self, day_of_year: u32) -> Result<Self> {
        let ordinal = Field::DayOfYear.check_u32(day_of_year as i64)?;
        let date = NaiveDate::from_yo_opt(self.year(), ordinal).ok_or_else(|| {
            Error::invalid(
                Field::DayOfYear,
                ordinal as i64,
                format!("{} has {} days", self.year(), self.year_length()),
            )
        })?;
        Ok(self.with_local_date(date))
    }

    pub fn with_date(&self, date: NaiveDate) -> Result<Self> {
        Self::from_date_time(date, self.local_time(), self.offset)
    }

    pub fn with_hour(&self, hour: u32) -> Result<Self> {
        self.with_time_fields(hour, self.minute(), self.second(), self.nanosecond())
    }

    pub fn with_minute(&self, minute: u32) -> Result<Self> {
        self.with_time_fields(self.hour(), minute, self.second(), self.nanosecond())
    }

    pub fn with_second(&self, second: u32) -> Result<Self> {
        self.with_time_fields(self.hour(), self.minute(), second, self.nanosecond())
    }

    pub fn with_nanosecond(&self, nano: u32) -> Result<Self> {
        self.with_time_fields(self.hour(), self.minute(), self.second(), nano)
    }

    pub fn with_time(&self, time: NaiveTime) -> Result<Self> {
        Self::from_date_time(self.local_date(), time, self.offset)
    }

    /// Replace the local date-time, keeping the offset.
    pub fn with_date_time(&self, date_time: NaiveDateTime) -> Result<Self> {
        Self::from_local(date_time, self.offset)
    }

    pub fn with_date_adjusted(&self, adjuster: &dyn DateAdjuster) -> Result<Self> {
        self.with_date(adjuster.adjust_date(self.local_date())?)
    }

    pub fn with_time_adjusted(&self, adjuster: &dyn TimeAdjuster) -> Result<Self> {
        self.with_time(adjuster.adjust_time(self.local_time())?)
    }

    /// Re-tag the local date-time with another offset. The instant changes
    /// unless the offsets are equal.
    pub fn with_offset_same_local(&self, offset: ZoneOffset) -> Self {
        Self {
            date_time: self.date_time,
            offset,
        }
    }

    /// Express the same instant at another offset.
    pub fn with_offset_same_instant(&self, offset: ZoneOffset) -> Result<Self> {
        if offset == self.offset {
            return Ok(*self);
        }
        let difference = offset.total_seconds() as i64 - self.offset.total_seconds() as i64;
        Self::from_local(local::plus_seconds(self.date_time, difference)?, offset)
    }

    fn with_local_date(&self, date: NaiveDate) -> Self {
        Self {
            date_time: date.and_time(self.local_time()),
            offset: self.offset,
        }
    }

    fn with_time_fields(&self, hour: u32, minute: u32, second: u32, nano: u32) -> Result<Self> {
        let time = time_of(hour as i64, minute as i64, second as i64, nano as i64)?;
        Ok(Self {
            date_time: self.local_date().and_time(time),
            offset: self.offset,
        })
    }

    /// Add a period: months (years included) first with day clamping, then
    /// days, then the time units with carry into the date.
    pub fn plus(&self, period: &Period) -> Result<Self> {
        let date = local::plus_months(
            self.local_date(),
            period.total_months()?,
            &DateResolvers::PreviousValid,
        )?;
        let date = local::plus_days(date, period.days)?;
        let date_time = local::plus_time(
            date.and_time(self.local_time()),
            period.hours,
            period.minutes,
            period.seconds,
            period.nanos,
        )?;
        Ok(Self {
            date_time,
            offset: self.offset,
        })
    }

    pub fn minus(&self, period: &Period) -> Result<Self> {
        self.plus(&period.negated()?)
    }

    pub fn plus_years(&self, years: i64) -> Result<Self> {
        self.plus_years_resolved(years, &DateResolvers::PreviousValid)
    }

    pub fn plus_years_resolved(&self, years: i64, resolver: &dyn DateResolver) -> Result<Self> {
        Ok(self.with_local_date(local::plus_years(self.local_date(), years, resolver)?))
    }

    pub fn plus_months(&self, months: i64) -> Result<Self> {
        self.plus_months_resolved(months, &DateResolvers::PreviousValid)
    }

    pub fn plus_months_resolved(&self, months: i64, resolver: &dyn DateResolver) -> Result<Self> {
        Ok(self.with_local_date(local::plus_months(self.local_date(), months, resolver)?))
    }

    pub fn plus_weeks(&self, weeks: i64) -> Result<Self> {
        self.plus_days(safe_mul(weeks, 7)?)
    }

    pub fn plus_days(&self, days: i64) -> Result<Self> {
        Ok(self.with_local_date(local::plus_days(self.local_date(), days)?))
    }

    pub fn plus_hours(&self, hours: i64) -> Result<Self> {
        self.plus_time(hours, 0, 0, 0)
    }

    pub fn plus_minutes(&self, minutes: i64) -> Result<Self> {
        self.plus_time(0, minutes, 0, 0)
    }

    pub fn plus_seconds(&self, seconds: i64) -> Result<Self> {
        self.plus_time(0, 0, seconds, 0)
    }

    pub fn plus_nanos(&self, nanos: i64) -> Result<Self> {
        self.plus_time(0, 0, 0, nanos)
    }

    pub fn minus_years(&self, years: i64) -> Result<Self> {
        self.plus_years(safe_neg(years)?)
    }

    pub fn minus_years_resolved(&self, years: i64, resolver: &dyn DateResolver) -> Result<Self> {
        self.plus_years_resolved(safe_neg(years)?, resolver)
    }

    pub fn minus_months(&self, months: i64) -> Result<Self> {
        self.plus_months(safe_neg(months)?)
    }

    pub fn minus_months_resolved(&self, months: i64, resolver: &dyn DateResolver) -> Result<Self> {
        self.plus_months_resolved(safe_neg(months)?, resolver)
    }

    pub fn minus_weeks(&self, weeks: i64) -> Result<Self> {
        self.plus_weeks(safe_neg(weeks)?)
    }

    pub fn minus_days(&self, days: i64) -> Result<Self> {
        self.plus_days(safe_neg(days)?)
    }

    pub fn minus_hours(&self, hours: i64) -> Result<Self> {
        self.plus_hours(safe_neg(hours)?)
    }

    pub fn minus_minutes(&self, minutes: i64) -> Result<Self> {
        self.plus_minutes(safe_neg(minutes)?)
    }

    pub fn minus_seconds(&self, seconds: i64) -> Result<Self> {
        self.plus_seconds(safe_neg(seconds)?)
    }

    pub fn minus_nanos(&self, nanos: i64) -> Result<Self> {
        self.plus_nanos(safe_neg(nanos)?)
    }

    fn plus_time(&self, hours: i64, minutes: i64, seconds: i64, nanos: i64) -> Result<Self> {
        Ok(Self {
            date_time: local::plus_time(self.date_time, hours, minutes, seconds, nanos)?,
            offset: self.offset,
        })
    }

    /// The same instant in `zone`; local fields may change.
    pub fn at_zone_same_instant(&self, zone: TimeZone) -> Result<ZonedDateTime> {
        ZonedDateTime::of_instant(self.to_instant(), zone)
    }

    /// The same local fields in `zone` where the zone allows them.
    ///
    /// Gaps resolve to the first instant after the transition and overlaps
    /// to the later offset.
    pub fn at_zone_similar_local(&self, zone: TimeZone) -> Result<ZonedDateTime> {
        self.at_zone_similar_local_with(zone, &ZoneResolvers::PostTransition)
    }

    pub fn at_zone_similar_local_with(
        &self,
        zone: TimeZone,
        resolver: &dyn ZoneResolver,
    ) -> Result<ZonedDateTime> {
        ZonedDateTime::of_local(self.date_time, zone, resolver, Some(self.offset))
    }

    fn instant_cmp(&self, other: &Self) -> Ordering {
        self.to_epoch_seconds()
            .cmp(&other.to_epoch_seconds())
            .then_with(|| self.nanosecond().cmp(&other.nanosecond()))
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.instant_cmp(other) == Ordering::Less
    }

    pub fn is_after(&self, other: &Self) -> bool {
        self.instant_cmp(other) == Ordering::Greater
    }

    /// Run a query against this date-time.
    pub fn matches(&self, matcher: &dyn CalendricalMatcher) -> bool {
        matcher.matches_calendrical(self)
    }

    /// Whether both values denote the same instant, whatever their offsets.
    pub fn equal_instant(&self, other: &Self) -> bool {
        self.instant_cmp(other) == Ordering::Equal
    }
}

impl Ord for OffsetDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.offset == other.offset {
            return self.date_time.cmp(&other.date_time);
        }
        self.instant_cmp(other)
            .then_with(|| self.date_time.cmp(&other.date_time))
    }
}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl DateAdjuster for OffsetDateTime {
    fn adjust_date(&self, _date: NaiveDate) -> Result<NaiveDate> {
        Ok(self.local_date())
    }
}

impl TimeAdjuster for OffsetDateTime {
    fn adjust_time(&self, _time: NaiveTime) -> Result<NaiveTime> {
        Ok(self.local_time())
    }
}

impl fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatters::iso_offset_date_time()
            .print_to(self, f)
            .map_err(|_| fmt::Error)
    }
}

impl FromStr for OffsetDateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OffsetDateTime {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OffsetDateTime {
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
    use crate::calendar::adjuster::DateAdjusters;
    use proptest::prelude::*;

    fn hours(h: i32) -> ZoneOffset {
        ZoneOffset::of_hours(h).unwrap()
    }

    fn sample() -> OffsetDateTime {
        OffsetDateTime::of(2007, 12, 3, 10, 15, 30, 0, hours(1)).unwrap()
    }

    #[test]
    fn accessors() {
        let odt = sample();
        assert_eq!(odt.year(), 2007);
        assert_eq!(odt.month(), 12);
        assert_eq!(odt.month_of_year(), Month::December);
        assert_eq!(odt.day_of_month(), 3);
        assert_eq!(odt.day_of_year(), 337);
        assert_eq!(odt.day_of_week(), Weekday::Mon);
        assert_eq!((odt.hour(), odt.minute(), odt.second(), odt.nanosecond()), (10, 15, 30, 0));
        assert_eq!(odt.offset(), hours(1));
        assert!(!odt.is_leap_year());
        assert_eq!(odt.year_length(), 365);
    }

    #[test]
    fn construction_failures() {
        assert!(matches!(
            OffsetDateTime::of(2007, 13, 1, 0, 0, 0, 0, ZoneOffset::UTC),
            Err(Error::FieldOutOfRange { .. })
        ));
        assert!(matches!(
            OffsetDateTime::of(2007, 2, 30, 0, 0, 0, 0, ZoneOffset::UTC),
            Err(Error::InvalidForContext { .. })
        ));
        assert!(matches!(
            OffsetDateTime::of(2007, 2, 1, 24, 0, 0, 0, ZoneOffset::UTC),
            Err(Error::FieldOutOfRange { .. })
        ));
        let leap = NaiveDate::from_ymd_opt(2008, 12, 31)
            .unwrap()
            .and_hms_nano_opt(23, 59, 59, 1_500_000_000)
            .unwrap();
        assert!(OffsetDateTime::from_local(leap, ZoneOffset::UTC).is_err());
    }

    #[test]
    fn epoch_seconds() {
        assert_eq!(sample().to_epoch_seconds(), 1_196_673_330);
        let epoch = OffsetDateTime::midnight(1970, 1, 1, ZoneOffset::UTC).unwrap();
        assert_eq!(epoch.to_epoch_seconds(), 0);
        assert_eq!(epoch.to_instant(), Instant::EPOCH);
    }

    #[test]
    fn instants_before_the_epoch_floor() {
        let odt = OffsetDateTime::from_epoch_seconds(-86_400, 0, ZoneOffset::UTC).unwrap();
        assert_eq!(odt.local_date(), NaiveDate::from_ymd_opt(1969, 12, 31).unwrap());
        assert_eq!(odt.local_time(), NaiveTime::MIN);
        assert_eq!(odt.to_epoch_seconds(), -86_400);

        let odt = OffsetDateTime::from_epoch_seconds(-1, 0, ZoneOffset::UTC).unwrap();
        assert_eq!(odt.to_string(), "1969-12-31T23:59:59Z");
        assert_eq!(odt.to_epoch_seconds(), -1);

        let odt = OffsetDateTime::from_epoch_seconds(0, -1, hours(-1)).unwrap();
        assert_eq!(odt.to_string(), "1969-12-31T22:59:59.999999999-01:00");
        assert_eq!(odt.to_instant().epoch_seconds(), -1);
        assert_eq!(odt.to_instant().nanos(), 999_999_999);
    }

    #[test]
    fn offset_transforms() {
        let odt = sample();
        let same_local = odt.with_offset_same_local(hours(-5));
        assert_eq!(same_local.local_date_time(), odt.local_date_time());
        assert!(!same_local.equal_instant(&odt));

        let same_instant = odt.with_offset_same_instant(hours(-5)).unwrap();
        assert_eq!(same_instant.hour(), 4);
        assert!(same_instant.equal_instant(&odt));

        let crossing = odt.with_offset_same_instant(hours(18)).unwrap();
        assert_eq!(crossing.to_string(), "2007-12-04T03:15:30+18:00");
    }

    #[test]
    fn with_fields() {
        let odt = OffsetDateTime::of_hm(2008, 2, 29, 12, 0, ZoneOffset::UTC).unwrap();
        assert_eq!(odt.with_year(2009).unwrap().day_of_month(), 28);
        assert!(odt.with_year_resolved(2009, &DateResolvers::Strict).is_err());
        let jan31 = odt.with_month(1).unwrap().with_day_of_month(31).unwrap();
        assert_eq!(jan31.with_month(4).unwrap().day_of_month(), 30);
        assert!(matches!(
            jan31.with_month(2).unwrap().with_day_of_month(30),
            Err(Error::InvalidForContext { .. })
        ));
        assert_eq!(
            odt.with_day_of_month_resolved(31, &DateResolvers::NextValid).unwrap().local_date(),
            NaiveDate::from_ymd_opt(2008, 3, 1).unwrap()
        );
        assert_eq!(odt.with_day_of_year(366).unwrap().month(), 12);
        assert!(odt.with_year(2009).unwrap().with_day_of_year(366).is_err());
        assert_eq!(odt.with_hour(23).unwrap().hour(), 23);
        assert!(odt.with_minute(60).is_err());
        assert_eq!(odt.with_nanosecond(5).unwrap().nanosecond(), 5);
        assert!(odt.with_month(0).is_err());
    }

    #[test]
    fn adjusters() {
        let odt = sample();
        let adjusted = odt.with_date_adjusted(&DateAdjusters::LastDayOfMonth).unwrap();
        assert_eq!(adjusted.day_of_month(), 31);
        assert_eq!(adjusted.local_time(), odt.local_time());
        let other = OffsetDateTime::of_hm(2001, 1, 1, 6, 30, hours(3)).unwrap();
        let replaced = odt.with_date_adjusted(&other).unwrap().with_time_adjusted(&other).unwrap();
        assert_eq!(replaced.local_date_time(), other.local_date_time());
        assert_eq!(replaced.offset(), odt.offset());
    }

    #[test]
    fn period_arithmetic() {
        let odt = OffsetDateTime::of_hms(2007, 1, 31, 23, 0, 0, ZoneOffset::UTC).unwrap();
        let later = odt.plus(&Period::of_months(1).with_days(1).with_hours(2)).unwrap();
        assert_eq!(later.to_string(), "2007-03-02T01:00:00Z");
        assert_eq!(later.minus(&Period::of_hours(2)).unwrap().to_string(), "2007-03-01T23:00:00Z");
        assert_eq!(odt.plus_months(1).unwrap().day_of_month(), 28);
        assert_eq!(
            odt.plus_months_resolved(1, &DateResolvers::PartLenient).unwrap().local_date(),
            NaiveDate::from_ymd_opt(2007, 3, 3).unwrap()
        );
        assert_eq!(odt.plus_weeks(1).unwrap().day_of_month(), 7);
        assert_eq!(odt.minus_days(31).unwrap().to_string(), "2006-12-31T23:00:00Z");
        assert_eq!(odt.plus_nanos(-1).unwrap().to_string(), "2007-01-31T22:59:59.999999999Z");
        assert_eq!(odt.minus_years(2007).unwrap().year(), 0);
        assert!(matches!(odt.plus_years(300_000), Err(Error::ArithmeticRange(_))));
        assert!(odt.minus_seconds(i64::MIN).is_err());
    }

    #[test]
    fn ordering_within_same_offset_is_local() {
        let a = sample();
        let b = a.plus_seconds(1).unwrap();
        assert!(a < b);
        assert!(a.is_before(&b));
        assert!(b.is_after(&a));
    }

    #[test]
    fn ordering_across_offsets_breaks_ties_locally() {
        let a = sample();
        let b = a.with_offset_same_instant(hours(3)).unwrap();
        assert!(a.equal_instant(&b));
        assert_ne!(a, b);
        assert_eq!(a.cmp(&b), a.local_date_time().cmp(&b.local_date_time()));
        assert!(a < b);
        assert!(!a.is_before(&b) && !a.is_after(&b));
    }

    #[test]
    fn date_and_time_halves() {
        let odt = sample();
        let date = odt.to_offset_date();
        let time = odt.to_offset_time();
        assert_eq!(date.to_string(), "2007-12-03+01:00");
        assert_eq!(time.to_string(), "10:15:30+01:00");
        assert_eq!(date.at_offset_time(&time).unwrap(), odt);
        assert_eq!(time.at_date(&date).unwrap(), odt);
    }

    #[test]
    fn parse_and_display() {
        let odt: OffsetDateTime = "2007-12-03T10:15:30+01:00".parse().unwrap();
        assert_eq!(odt, sample());
        assert_eq!(odt.to_string(), "2007-12-03T10:15:30+01:00");
        assert!(OffsetDateTime::parse("2007-12-03T10:15:30").is_err());
    }

    #[test]
    fn zone_attachment_with_fixed_zone() {
        let odt = sample();
        let zone = TimeZone::fixed(hours(-5));
        let same_instant = odt.at_zone_same_instant(zone).unwrap();
        assert_eq!(same_instant.offset(), hours(-5));
        assert!(same_instant.offset_date_time().equal_instant(&odt));
        let similar = odt.at_zone_similar_local(zone).unwrap();
        assert_eq!(similar.local_date_time(), odt.local_date_time());
    }

    #[cfg(feature = "tzdb")]
    #[test]
    fn zone_attachment_in_a_gap() {
        let paris = TimeZone::of("Europe/Paris").unwrap();
        let odt = OffsetDateTime::of_hm(2023, 3, 26, 2, 30, hours(1)).unwrap();
        let similar = odt.at_zone_similar_local(paris).unwrap();
        assert_eq!(similar.to_string(), "2023-03-26T03:00:00+02:00[Europe/Paris]");
        let pushed = odt
            .at_zone_similar_local_with(paris, &ZoneResolvers::PushForward)
            .unwrap();
        assert_eq!(pushed.local_time(), NaiveTime::from_hms_opt(3, 30, 0).unwrap());
        let same_instant = odt.at_zone_same_instant(paris).unwrap();
        assert_eq!(same_instant.to_string(), "2023-03-26T03:30:00+02:00[Europe/Paris]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_from_iso_text() {
        use serde::Deserialize;
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error as ValueError, StrDeserializer};

        let de: StrDeserializer<'_, ValueError> = "2007-12-03T10:15:30+01:00".into_deserializer();
        assert_eq!(OffsetDateTime::deserialize(de).unwrap(), sample());
        let de: StrDeserializer<'_, ValueError> = "2007-12-03".into_deserializer();
        assert!(OffsetDateTime::deserialize(de).is_err());
    }

    fn arb_offset() -> impl Strategy<Value = ZoneOffset> {
        (-64_800i32..=64_800).prop_map(|secs| ZoneOffset::of_total_seconds(secs).unwrap())
    }

    proptest! {
        #[test]
        fn instant_round_trip(
            seconds in -50_000_000_000i64..50_000_000_000,
            nanos in 0i64..1_000_000_000,
            offset in arb_offset(),
        ) {
            let odt = OffsetDateTime::from_epoch_seconds(seconds, nanos, offset).unwrap();
            prop_assert_eq!(odt.to_epoch_seconds(), seconds);
            prop_assert_eq!(odt.nanosecond() as i64, nanos);
            prop_assert_eq!(OffsetDateTime::from_instant(odt.to_instant(), offset).unwrap(), odt);
        }

        #[test]
        fn offset_change_returns_to_instant(
            seconds in -10_000_000_000i64..10_000_000_000,
            first in arb_offset(),
            second in arb_offset(),
        ) {
            let odt = OffsetDateTime::from_epoch_seconds(seconds, 0, first).unwrap();
            let back = odt
                .with_offset_same_local(second)
                .with_offset_same_instant(first)
                .unwrap();
            let shifted = odt.with_offset_same_local(second);
            prop_assert!(back.equal_instant(&shifted));
            prop_assert_eq!(back.local_date_time() == odt.local_date_time(), first == second);
            let round_trip = odt
                .with_offset_same_instant(second)
                .unwrap()
                .with_offset_same_instant(first)
                .unwrap();
            prop_assert_eq!(round_trip, odt);
        }

        #[test]
        fn ordering_consistent_with_equality(
            a in -1_000_000i64..1_000_000,
            b in -1_000_000i64..1_000_000,
            oa in arb_offset(),
            ob in arb_offset(),
        ) {
            let x = OffsetDateTime::from_epoch_seconds(a, 0, oa).unwrap();
            let y = OffsetDateTime::from_epoch_seconds(b, 0, ob).unwrap();
            prop_assert_eq!(x.cmp(&y) == Ordering::Equal, x == y);
            prop_assert_eq!(x.cmp(&y), y.cmp(&x).reverse());
            if oa == ob {
                prop_assert_eq!(x.cmp(&y), x.local_date_time().cmp(&y.local_date_time()));
            } else if !x.equal_instant(&y) {
                prop_assert_eq!(x.cmp(&y), a.cmp(&b));
            }
        }
    }
}
