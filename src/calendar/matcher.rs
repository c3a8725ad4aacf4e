//! Queries that test a calendrical value.
//!
//! Values act as matchers for themselves: a value matches another when the
//! other derives every field it carries with the same value, offset
//! included. [`CalendricalMatchers`] holds the common rule-based queries.

use super::calendrical::Calendrical;
use super::field::Field;
use super::local::{days_in_month, is_leap_year};
use super::offset::ZoneOffset;
use super::offset_date::OffsetDate;
use super::offset_date_time::OffsetDateTime;
use super::offset_time::OffsetTime;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

pub trait CalendricalMatcher {
    fn matches_calendrical(&self, value: &dyn Calendrical) -> bool;
}

/// Whether `value` agrees with every field `expected` derives.
fn agrees(expected: &dyn Calendrical, value: &dyn Calendrical) -> bool {
    Field::ALL.into_iter().all(|field| {
        expected
            .get(field)
            .is_none_or(|wanted| value.get(field) == Some(wanted))
    })
}

macro_rules! self_matcher {
    ($($ty:ty),* $(,)?) => {
        $(
            impl CalendricalMatcher for $ty {
                fn matches_calendrical(&self, value: &dyn Calendrical) -> bool {
                    agrees(self, value)
                }
            }
        )*
    };
}

self_matcher!(
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    ZoneOffset,
    OffsetDate,
    OffsetTime,
    OffsetDateTime,
);

impl<M: CalendricalMatcher + ?Sized> CalendricalMatcher for &M {
    fn matches_calendrical(&self, value: &dyn Calendrical) -> bool {
        (**self).matches_calendrical(value)
    }
}

/// Common rule-based queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendricalMatchers {
    /// The field is derivable and has the given value
    FieldValue(Field, i64),
    LeapYear,
    /// February 29
    LeapDay,
    LastDayOfMonth,
    /// Saturday or Sunday
    Weekend,
}

impl CalendricalMatcher for CalendricalMatchers {
    fn matches_calendrical(&self, value: &dyn Calendrical) -> bool {
        let year = value.get(Field::Year);
        match *self {
            Self::FieldValue(field, wanted) => value.get(field) == Some(wanted),
            Self::LeapYear => year.is_some_and(|y| is_leap_year(y as i32)),
            Self::LeapDay => {
                value.get(Field::MonthOfYear) == Some(2) && value.get(Field::DayOfMonth) == Some(29)
            },
            Self::LastDayOfMonth => {
                match (year, value.get(Field::MonthOfYear), value.get(Field::DayOfMonth)) {
                    (Some(y), Some(m), Some(d)) => d == days_in_month(y as i32, m as u32) as i64,
                    _ => false,
                }
            },
            Self::Weekend => value.get(Field::DayOfWeek).is_some_and(|dow| dow >= 6),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OffsetDateTime {
        OffsetDateTime::of(2008, 2, 29, 10, 15, 30, 0, ZoneOffset::of_hours(1).unwrap()).unwrap()
    }

    #[test]
    fn values_match_equal_fields() {
        let odt = sample();
        assert!(odt.matches(&odt));
        assert!(odt.matches(&odt.local_date()));
        assert!(odt.matches(&odt.to_offset_time()));
        assert!(!odt.matches(&NaiveDate::from_ymd_opt(2008, 3, 1).unwrap()));
        assert!(!odt.matches(&odt.with_offset_same_local(ZoneOffset::UTC)));
    }

    #[test]
    fn matching_against_a_value() {
        let odt = sample();
        assert!(odt.matches_calendrical(&odt));
        // a date-time is only matched by a value carrying all of its fields
        assert!(!odt.matches_calendrical(&odt.local_date()));
        assert!(!odt.matches_calendrical(&odt.local_date_time()));
        assert!(odt.local_date().matches_calendrical(&odt));
    }

    #[test]
    fn rule_based_matchers() {
        let odt = sample();
        assert!(odt.matches(&CalendricalMatchers::LeapYear));
        assert!(odt.matches(&CalendricalMatchers::LeapDay));
        assert!(odt.matches(&CalendricalMatchers::LastDayOfMonth));
        assert!(!odt.matches(&CalendricalMatchers::Weekend));
        assert!(odt.matches(&CalendricalMatchers::FieldValue(Field::DayOfYear, 60)));
        assert!(odt.matches(&CalendricalMatchers::FieldValue(Field::OffsetSeconds, 3600)));

        let saturday = odt.plus_days(1).unwrap();
        assert!(saturday.matches(&CalendricalMatchers::Weekend));
        assert!(!saturday.matches(&CalendricalMatchers::LastDayOfMonth));
        assert!(!CalendricalMatchers::LeapYear.matches_calendrical(&NaiveTime::MIN));
    }
}
