//! Day-of-month resolution for date arithmetic.
//!
//! Adding months or years can land on a day that does not exist (January 31
//! plus one month). A [`DateResolver`] decides what happens then; the value
//! engine defaults to [`DateResolvers::PreviousValid`].

use super::local::{date_of, days_in_month, plus_days};
use crate::common::Result;
use chrono::NaiveDate;

/// Strategy for turning a possibly invalid year/month/day into a date.
///
/// `year` and `month` are always within their absolute ranges; `day` is in
/// `1..=31` but may exceed the length of the month.
pub trait DateResolver: Send + Sync {
    fn resolve(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate>;
}

/// Stock resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateResolvers {
    /// Fail with [`Error::InvalidForContext`] when the day does not exist
    Strict,
    /// Clamp to the last valid day of the month
    #[default]
    PreviousValid,
    /// Move to the first day of the following month
    NextValid,
    /// Roll the excess days into the following month
    PartLenient,
}

impl DateResolver for DateResolvers {
    fn resolve(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate> {
        let last = days_in_month(year, month);
        if day <= last {
            return date_of(year as i64, month as i64, day as i64);
        }
        match self {
            Self::Strict => date_of(year as i64, month as i64, day as i64),
            Self::PreviousValid => date_of(year as i64, month as i64, last as i64),
            Self::NextValid => {
                let last_day = date_of(year as i64, month as i64, last as i64)?;
                plus_days(last_day, 1)
            },
            Self::PartLenient => {
                let last_day = date_of(year as i64, month as i64, last as i64)?;
                plus_days(last_day, (day - last) as i64)
            },
        }
    }
}

impl<R: DateResolver + ?Sized> DateResolver for &R {
    fn resolve(&self, year: i32, month: u32, day: u32) -> Result<NaiveDate> {
        (**self).resolve(year, month, day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn valid_days_pass_through() {
        for resolver in [
            DateResolvers::Strict,
            DateResolvers::PreviousValid,
            DateResolvers::NextValid,
            DateResolvers::PartLenient,
        ] {
            assert_eq!(resolver.resolve(2007, 2, 28), Ok(date(2007, 2, 28)));
        }
    }

    #[test]
    fn invalid_day_handling() {
        assert!(matches!(
            DateResolvers::Strict.resolve(2007, 2, 30),
            Err(Error::InvalidForContext { .. })
        ));
        assert_eq!(DateResolvers::PreviousValid.resolve(2007, 2, 30), Ok(date(2007, 2, 28)));
        assert_eq!(DateResolvers::NextValid.resolve(2007, 2, 30), Ok(date(2007, 3, 1)));
        assert_eq!(DateResolvers::PartLenient.resolve(2007, 2, 30), Ok(date(2007, 3, 2)));
        assert_eq!(DateResolvers::PreviousValid.resolve(2008, 2, 31), Ok(date(2008, 2, 29)));
    }

    #[test]
    fn default_is_clamp() {
        assert_eq!(DateResolvers::default(), DateResolvers::PreviousValid);
    }
}
