//! Field access shared by every value the formatter can print.

use super::field::Field;
use super::offset::ZoneOffset;
use super::offset_date::OffsetDate;
use super::offset_date_time::OffsetDateTime;
use super::offset_time::OffsetTime;
use super::zone::TimeZone;
use super::zoned::ZonedDateTime;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Source of field values for printing.
///
/// A value answers only for the fields it can derive; everything else is
/// `None`, which printing reports as an unsupported field.
pub trait Calendrical {
    fn get(&self, field: Field) -> Option<i64>;

    fn get_offset(&self) -> Option<ZoneOffset> {
        None
    }

    /// The zone; values that only carry an offset answer with the
    /// fixed zone of that offset.
    fn get_zone(&self) -> Option<TimeZone> {
        self.get_offset().map(TimeZone::Fixed)
    }
}

impl Calendrical for NaiveDate {
    fn get(&self, field: Field) -> Option<i64> {
        field.get_from_date(self)
    }
}

impl Calendrical for NaiveTime {
    fn get(&self, field: Field) -> Option<i64> {
        field.get_from_time(self)
    }
}

impl Calendrical for NaiveDateTime {
    fn get(&self, field: Field) -> Option<i64> {
        field
            .get_from_date(&self.date())
            .or_else(|| field.get_from_time(&self.time()))
    }
}

impl Calendrical for ZoneOffset {
    fn get(&self, field: Field) -> Option<i64> {
        (field == Field::OffsetSeconds).then_some(self.total_seconds() as i64)
    }

    fn get_offset(&self) -> Option<ZoneOffset> {
        Some(*self)
    }
}

impl Calendrical for OffsetDateTime {
    fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::OffsetSeconds => Some(self.offset().total_seconds() as i64),
            _ => self.local_date_time().get(field),
        }
    }

    fn get_offset(&self) -> Option<ZoneOffset> {
        Some(self.offset())
    }
}

impl Calendrical for OffsetDate {
    fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::OffsetSeconds => Some(self.offset().total_seconds() as i64),
            _ => field.get_from_date(&self.local_date()),
        }
    }

    fn get_offset(&self) -> Option<ZoneOffset> {
        Some(self.offset())
    }
}

impl Calendrical for OffsetTime {
    fn get(&self, field: Field) -> Option<i64> {
        match field {
            Field::OffsetSeconds => Some(self.offset().total_seconds() as i64),
            _ => field.get_from_time(&self.local_time()),
        }
    }

    fn get_offset(&self) -> Option<ZoneOffset> {
        Some(self.offset())
    }
}

impl Calendrical for ZonedDateTime {
    fn get(&self, field: Field) -> Option<i64> {
        self.offset_date_time().get(field)
    }

    fn get_offset(&self) -> Option<ZoneOffset> {
        Some(self.offset())
    }

    fn get_zone(&self) -> Option<TimeZone> {
        Some(self.zone())
    }
}

impl<C: Calendrical + ?Sized> Calendrical for &C {
    fn get(&self, field: Field) -> Option<i64> {
        (**self).get(field)
    }

    fn get_offset(&self) -> Option<ZoneOffset> {
        (**self).get_offset()
    }

    fn get_zone(&self) -> Option<TimeZone> {
        (**self).get_zone()
    }
}
