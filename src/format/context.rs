//! Parse state and resolution of parsed fields into values.

use super::element::LocalizedPatterns;
use super::locale::{Locale, LocaleProvider};
use crate::calendar::local::{date_of, time_of};
use crate::calendar::{
    Calendrical, Field, OffsetDate, OffsetDateTime, OffsetTime, TimeZone, ZoneOffset, ZoneResolvers,
    ZonedDateTime,
};
use crate::common::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use smallvec::SmallVec;
use std::fmt;

/// Field values collected by a parse, before resolution.
///
/// Each field is recorded at most once; the offset and zone are kept apart
/// from the numeric fields. [`OffsetSeconds`](Field::OffsetSeconds) reads
/// through to the offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    fields: SmallVec<[(Field, i64); 8]>,
    offset: Option<ZoneOffset>,
    zone: Option<TimeZone>,
}

impl Parsed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<i64> {
        if field == Field::OffsetSeconds {
            return self.offset.map(|o| o.total_seconds() as i64);
        }
        self.fields.iter().find(|(f, _)| *f == field).map(|(_, v)| *v)
    }

    pub fn offset(&self) -> Option<ZoneOffset> {
        self.offset
    }

    pub fn zone(&self) -> Option<TimeZone> {
        self.zone
    }

    /// Numeric fields in the order they were parsed.
    pub fn fields(&self) -> impl Iterator<Item = (Field, i64)> + '_ {
        self.fields.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.offset.is_none() && self.zone.is_none()
    }

    /// Resolve the local date from year-month-day, year-day or week-date
    /// fields, then check every other parsed date field against it.
    pub fn resolve_date(&self) -> Result<NaiveDate> {
        let date = if let (Some(y), Some(m), Some(d)) = (
            self.get(Field::Year),
            self.get(Field::MonthOfYear),
            self.get(Field::DayOfMonth),
        ) {
            date_of(y, m, d)?
        } else if let (Some(y), Some(doy)) = (self.get(Field::Year), self.get(Field::DayOfYear)) {
            let year = Field::Year.check_i32(y)?;
            let ordinal = Field::DayOfYear.check_u32(doy)?;
            NaiveDate::from_yo_opt(year, ordinal)
                .ok_or_else(|| {
                    Error::invalid(Field::DayOfYear, doy, format!("year {year} has no such day"))
                })?
        } else if let (Some(wby), Some(week), Some(dow)) = (
            self.get(Field::WeekBasedYear),
            self.get(Field::WeekOfWeekBasedYear),
            self.get(Field::DayOfWeek),
        ) {
            let year = Field::WeekBasedYear.check_i32(wby)?;
            let w = Field::WeekOfWeekBasedYear.check_u32(week)?;
            let weekday = weekday_from_iso(Field::DayOfWeek.check(dow)?);
            NaiveDate::from_isoywd_opt(year, w, weekday).ok_or_else(|| {
                let reason = format!("week-based year {year} has no such week");
                Error::invalid(Field::WeekOfWeekBasedYear, week, reason)
            })?
        } else {
            let missing = [Field::Year, Field::MonthOfYear, Field::DayOfMonth]
                .into_iter()
                .find(|f| self.get(*f).is_none())
                .unwrap_or(Field::DayOfMonth);
            return Err(Error::UnsupportedField { field: missing.name() });
        };
        self.cross_check(|field| field.get_from_date(&date), &date)?;
        Ok(date)
    }

    /// Resolve the local time; minute, second and nanosecond default to zero.
    pub fn resolve_time(&self) -> Result<NaiveTime> {
        let hour = if let Some(h) = self.get(Field::HourOfDay) {
            Field::HourOfDay.check(h)?
        } else if let Some(h) = self.get(Field::ClockHourOfDay) {
            Field::ClockHourOfDay.check(h)? % 24
        } else if let Some(am_pm) = self.get(Field::AmPmOfDay) {
            let half = Field::AmPmOfDay.check(am_pm)? * 12;
            if let Some(h) = self.get(Field::HourOfAmPm) {
                half + Field::HourOfAmPm.check(h)?
            } else if let Some(h) = self.get(Field::ClockHourOfAmPm) {
                half + Field::ClockHourOfAmPm.check(h)? % 12
            } else {
                return Err(Error::UnsupportedField {
                    field: Field::HourOfAmPm.name(),
                });
            }
        } else if self.get(Field::HourOfAmPm).is_some()
            || self.get(Field::ClockHourOfAmPm).is_some()
        {
            return Err(Error::UnsupportedField {
                field: Field::AmPmOfDay.name(),
            });
        } else {
            return Err(Error::UnsupportedField {
                field: Field::HourOfDay.name(),
            });
        };
        let time = time_of(
            hour,
            self.get(Field::MinuteOfHour).unwrap_or(0),
            self.get(Field::SecondOfMinute).unwrap_or(0),
            self.get(Field::NanoOfSecond).unwrap_or(0),
        )?;
        self.cross_check(|field| field.get_from_time(&time), &time)?;
        Ok(time)
    }

    fn cross_check(
        &self,
        derive: impl Fn(Field) -> Option<i64>,
        resolved: &dyn fmt::Display,
    ) -> Result<()> {
        for (field, value) in self.fields() {
            if let Some(expected) = derive(field)
                && expected != value
            {
                return Err(Error::invalid(field, value, format!("conflicts with {resolved}")));
            }
        }
        Ok(())
    }

    pub(crate) fn set_field(&mut self, field: Field, value: i64) -> std::result::Result<(), i64> {
        match self.get(field) {
            Some(existing) if existing != value => Err(existing),
            Some(_) => Ok(()),
            None => {
                self.fields.push((field, value));
                Ok(())
            },
        }
    }

    pub(crate) fn set_offset(&mut self, offset: ZoneOffset) -> std::result::Result<(), ZoneOffset> {
        match self.offset {
            Some(existing) if existing != offset => Err(existing),
            _ => {
                self.offset = Some(offset);
                Ok(())
            },
        }
    }

    pub(crate) fn set_zone(&mut self, zone: TimeZone) -> std::result::Result<(), TimeZone> {
        match self.zone {
            Some(existing) if existing != zone => Err(existing),
            _ => {
                self.zone = Some(zone);
                Ok(())
            },
        }
    }
}

impl Calendrical for Parsed {
    fn get(&self, field: Field) -> Option<i64> {
        Parsed::get(self, field)
    }

    fn get_offset(&self) -> Option<ZoneOffset> {
        self.offset
    }

    fn get_zone(&self) -> Option<TimeZone> {
        self.zone.or(self.offset.map(TimeZone::Fixed))
    }
}

fn weekday_from_iso(n: i64) -> Weekday {
    match n {
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// A value that can be built from parsed fields.
pub trait FromParsed: Sized {
    fn from_parsed(parsed: &Parsed) -> Result<Self>;
}

impl FromParsed for Parsed {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        Ok(parsed.clone())
    }
}

impl FromParsed for NaiveDate {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        parsed.resolve_date()
    }
}

impl FromParsed for NaiveTime {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        parsed.resolve_time()
    }
}

impl FromParsed for NaiveDateTime {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        Ok(parsed.resolve_date()?.and_time(parsed.resolve_time()?))
    }
}

impl FromParsed for ZoneOffset {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        parsed.offset.ok_or(Error::UnsupportedField {
            field: Field::OffsetSeconds.name(),
        })
    }
}

impl FromParsed for TimeZone {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        parsed.get_zone().ok_or(Error::UnsupportedField { field: "ZoneId" })
    }
}

/// The parsed offset, or the offset of a parsed fixed zone. A date or time
/// alone cannot resolve a region zone's offset.
fn fixed_offset(parsed: &Parsed) -> Result<ZoneOffset> {
    parsed
        .offset
        .or_else(|| parsed.zone.and_then(|zone| zone.fixed_offset()))
        .ok_or(Error::UnsupportedField {
            field: Field::OffsetSeconds.name(),
        })
}

impl FromParsed for OffsetDate {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        let date = parsed.resolve_date()?;
        OffsetDate::from_date(date, fixed_offset(parsed)?)
    }
}

impl FromParsed for OffsetTime {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        let time = parsed.resolve_time()?;
        OffsetTime::from_time(time, fixed_offset(parsed)?)
    }
}

impl FromParsed for OffsetDateTime {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        let local = NaiveDateTime::from_parsed(parsed)?;
        match (parsed.offset, parsed.zone) {
            (Some(offset), _) => OffsetDateTime::from_local(local, offset),
            (None, Some(zone)) => zone.resolve(local, &ZoneResolvers::PostTransition, None),
            (None, None) => Err(Error::UnsupportedField {
                field: Field::OffsetSeconds.name(),
            }),
        }
    }
}

impl FromParsed for ZonedDateTime {
    fn from_parsed(parsed: &Parsed) -> Result<Self> {
        let zone = parsed.zone.ok_or(Error::UnsupportedField { field: "ZoneId" })?;
        let local = NaiveDateTime::from_parsed(parsed)?;
        match parsed.offset {
            Some(offset) => {
                ZonedDateTime::of_strict(OffsetDateTime::from_local(local, offset)?, zone)
            },
            None => ZonedDateTime::of_local(local, zone, &ZoneResolvers::PostTransition, None),
        }
    }
}

/// Failure of a single element to match, reported at a byte index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Mismatch {
    pub index: usize,
    pub expected: String,
}

impl Mismatch {
    pub fn new(index: usize, expected: impl fmt::Display) -> Self {
        Self {
            index,
            expected: expected.to_string(),
        }
    }
}

pub(crate) type ParseStep = std::result::Result<usize, Mismatch>;

/// Outcome of recording a parsed value; a conflicting earlier value is a mismatch.
pub(crate) type Recorded = std::result::Result<(), Mismatch>;

/// Mutable state threaded through the elements during one parse.
pub(crate) struct ParseContext<'a> {
    pub parsed: Parsed,
    pub case_sensitive: bool,
    pub locale: &'a Locale,
    pub provider: &'a dyn LocaleProvider,
    pub localized: Option<&'a LocalizedPatterns>,
}

/// Snapshot taken on entry to an optional section.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    fields: usize,
    offset: Option<ZoneOffset>,
    zone: Option<TimeZone>,
    case_sensitive: bool,
}

impl<'a> ParseContext<'a> {
    pub fn new(locale: &'a Locale, provider: &'a dyn LocaleProvider) -> Self {
        Self {
            parsed: Parsed::new(),
            case_sensitive: true,
            locale,
            provider,
            localized: None,
        }
    }

    pub fn with_localized(mut self, localized: &'a LocalizedPatterns) -> Self {
        self.localized = Some(localized);
        self
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            fields: self.parsed.fields.len(),
            offset: self.parsed.offset,
            zone: self.parsed.zone,
            case_sensitive: self.case_sensitive,
        }
    }

    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        self.parsed.fields.truncate(checkpoint.fields);
        self.parsed.offset = checkpoint.offset;
        self.parsed.zone = checkpoint.zone;
        self.case_sensitive = checkpoint.case_sensitive;
    }

    /// Case settings made inside a section end with it.
    pub fn end_section(&mut self, checkpoint: &Checkpoint) {
        self.case_sensitive = checkpoint.case_sensitive;
    }

    pub fn set_field(&mut self, field: Field, value: i64, index: usize) -> Recorded {
        self.parsed.set_field(field, value).map_err(|existing| {
            Mismatch::new(index, format_args!("{field} {existing}, found {value}"))
        })
    }

    pub fn set_offset(&mut self, offset: ZoneOffset, index: usize) -> Recorded {
        self.parsed.set_offset(offset).map_err(|existing| {
            Mismatch::new(index, format_args!("offset {existing}, found {offset}"))
        })
    }

    pub fn set_zone(&mut self, zone: TimeZone, index: usize) -> Recorded {
        self.parsed
            .set_zone(zone)
            .map_err(|existing| Mismatch::new(index, format_args!("zone {existing}, found {zone}")))
    }

    pub fn chars_match(&self, a: char, b: char) -> bool {
        a == b || (!self.case_sensitive && a.to_lowercase().eq(b.to_lowercase()))
    }

    /// Match `expected` at `pos`, returning the end index on success.
    pub fn match_str(&self, text: &str, pos: usize, expected: &str) -> Option<usize> {
        let mut actual = text.get(pos..)?.char_indices();
        for e in expected.chars() {
            let (_, a) = actual.next()?;
            if !self.chars_match(a, e) {
                return None;
            }
        }
        Some(actual.next().map_or(text.len(), |(i, _)| pos + i))
    }
}
