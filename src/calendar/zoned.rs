//! Date-time bound to a time-zone.

use super::instant::Instant;
use super::offset::ZoneOffset;
use super::offset_date_time::OffsetDateTime;
use super::zone::{LocalResolution, TimeZone, ZoneResolver, ZoneResolvers};
use crate::common::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;

/// An [`OffsetDateTime`] together with the zone whose rules produced its
/// offset, printed as `2007-12-03T10:15:30+01:00[Europe/Paris]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    date_time: OffsetDateTime,
    zone: TimeZone,
}

impl ZonedDateTime {
    /// The local date-time of `instant` in `zone`.
    pub fn of_instant(instant: Instant, zone: TimeZone) -> Result<Self> {
        let offset = zone.offset_at(instant)?;
        Ok(Self {
            date_time: OffsetDateTime::from_instant(instant, offset)?,
            zone,
        })
    }

    /// Resolve a local date-time in `zone`, using `resolver` for gaps and
    /// overlaps.
    pub fn of_local(
        local: NaiveDateTime,
        zone: TimeZone,
        resolver: &dyn ZoneResolver,
        previous: Option<ZoneOffset>,
    ) -> Result<Self> {
        Ok(Self {
            date_time: zone.resolve(local, resolver, previous)?,
            zone,
        })
    }

    /// Combine an offset date-time with a zone, requiring the offset to be
    /// valid for its local date-time in that zone.
    pub fn of_strict(date_time: OffsetDateTime, zone: TimeZone) -> Result<Self> {
        let valid = match zone.resolve_local(date_time.local_date_time())? {
            LocalResolution::Unique(offset) => offset == date_time.offset(),
            LocalResolution::Overlap(transition) => transition.is_valid_offset(date_time.offset()),
            LocalResolution::Gap(_) => false,
        };
        if !valid {
            return Err(Error::ZoneResolution(format!(
                "offset {} is not valid for {} in zone {}",
                date_time.offset(),
                date_time.local_date_time(),
                zone
            )));
        }
        Ok(Self { date_time, zone })
    }

    pub fn offset_date_time(&self) -> OffsetDateTime {
        self.date_time
    }

    pub fn zone(&self) -> TimeZone {
        self.zone
    }

    pub fn offset(&self) -> ZoneOffset {
        self.date_time.offset()
    }

    pub fn local_date_time(&self) -> NaiveDateTime {
        self.date_time.local_date_time()
    }

    pub fn local_date(&self) -> NaiveDate {
        self.date_time.local_date()
    }

    pub fn local_time(&self) -> NaiveTime {
        self.date_time.local_time()
    }

    pub fn to_instant(&self) -> Instant {
        self.date_time.to_instant()
    }

    /// In an overlap, switch to the earlier of the two valid offsets.
    pub fn with_earlier_offset_at_overlap(&self) -> Result<Self> {
        self.with_overlap_offset(|before, _| before)
    }

    /// In an overlap, switch to the later of the two valid offsets.
    pub fn with_later_offset_at_overlap(&self) -> Result<Self> {
        self.with_overlap_offset(|_, after| after)
    }

    fn with_overlap_offset(
        &self,
        pick: impl Fn(ZoneOffset, ZoneOffset) -> ZoneOffset,
    ) -> Result<Self> {
        match self.zone.resolve_local(self.local_date_time())? {
            LocalResolution::Overlap(transition) => {
                let offset = pick(transition.offset_before(), transition.offset_after());
                Ok(Self {
                    date_time: self.date_time.with_offset_same_local(offset),
                    zone: self.zone,
                })
            },
            _ => Ok(*self),
        }
    }

    /// The same instant in another zone.
    pub fn with_zone_same_instant(&self, zone: TimeZone) -> Result<Self> {
        Self::of_instant(self.to_instant(), zone)
    }

    /// The same local fields in another zone, keeping the current offset
    /// in an overlap when possible.
    pub fn with_zone_same_local(&self, zone: TimeZone) -> Result<Self> {
        Self::of_local(
            self.local_date_time(),
            zone,
            &ZoneResolvers::RetainOffset,
            Some(self.offset()),
        )
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.date_time, self.zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours(h: i32) -> ZoneOffset {
        ZoneOffset::of_hours(h).unwrap()
    }

    #[test]
    fn fixed_zone_display() {
        let odt = OffsetDateTime::of_hm(2007, 12, 3, 10, 15, hours(1)).unwrap();
        let zoned = ZonedDateTime::of_strict(odt, TimeZone::fixed(hours(1))).unwrap();
        assert_eq!(zoned.to_string(), "2007-12-03T10:15:00+01:00[UTC+01:00]");
        assert!(ZonedDateTime::of_strict(odt, TimeZone::UTC).is_err());
    }

    #[test]
    fn same_instant_across_zones() {
        let zoned = ZonedDateTime::of_instant(Instant::EPOCH, TimeZone::fixed(hours(-5))).unwrap();
        assert_eq!(zoned.to_string(), "1969-12-31T19:00:00-05:00[UTC-05:00]");
        let utc = zoned.with_zone_same_instant(TimeZone::UTC).unwrap();
        assert_eq!(utc.to_instant(), Instant::EPOCH);
        let same_local = zoned.with_zone_same_local(TimeZone::UTC).unwrap();
        assert_eq!(same_local.local_date_time(), zoned.local_date_time());
    }

    #[cfg(feature = "tzdb")]
    #[test]
    fn overlap_offsets() {
        let paris = TimeZone::of("Europe/Paris").unwrap();
        let local = NaiveDate::from_ymd_opt(2023, 10, 29)
            .unwrap()
            .and_hms_opt(2, 30, 0)
            .unwrap();
        let later =
            ZonedDateTime::of_local(local, paris, &ZoneResolvers::PostTransition, None).unwrap();
        assert_eq!(later.offset(), hours(1));
        let earlier = later.with_earlier_offset_at_overlap().unwrap();
        assert_eq!(earlier.offset(), hours(2));
        assert_eq!(earlier.with_later_offset_at_overlap().unwrap(), later);
        assert!(ZonedDateTime::of_strict(earlier.offset_date_time(), paris).is_ok());
        let wrong_offset = earlier.offset_date_time().with_offset_same_local(hours(3));
        assert!(ZonedDateTime::of_strict(wrong_offset, paris).is_err());
    }
}
