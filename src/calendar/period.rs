//! Amounts of calendar and clock time.

use crate::common::math::{safe_add, safe_mul, safe_neg};
use crate::common::Result;
use std::fmt;

/// An amount of time in years, months, days, hours, minutes, seconds and
/// nanoseconds.
///
/// Units are kept separately and never normalised against each other, since
/// the length of a month or year depends on the date it is added to.
/// Adding a period applies the months (years folded in) first, then the days,
/// then the time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub nanos: i64,
}

impl Period {
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        nanos: 0,
    };

    pub fn of_years(years: i64) -> Self {
        Self::ZERO.with_years(years)
    }

    pub fn of_months(months: i64) -> Self {
        Self::ZERO.with_months(months)
    }

    pub fn of_weeks(weeks: i64) -> Result<Self> {
        Ok(Self::ZERO.with_days(safe_mul(weeks, 7)?))
    }

    pub fn of_days(days: i64) -> Self {
        Self::ZERO.with_days(days)
    }

    pub fn of_hours(hours: i64) -> Self {
        Self::ZERO.with_hours(hours)
    }

    pub fn of_minutes(minutes: i64) -> Self {
        Self::ZERO.with_minutes(minutes)
    }

    pub fn of_seconds(seconds: i64) -> Self {
        Self::ZERO.with_seconds(seconds)
    }

    pub fn of_nanos(nanos: i64) -> Self {
        Self::ZERO.with_nanos(nanos)
    }

    pub fn with_years(mut self, years: i64) -> Self {
        self.years = years;
        self
    }

    pub fn with_months(mut self, months: i64) -> Self {
        self.months = months;
        self
    }

    pub fn with_days(mut self, days: i64) -> Self {
        self.days = days;
        self
    }

    pub fn with_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    pub fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    pub fn with_nanos(mut self, nanos: i64) -> Self {
        self.nanos = nanos;
        self
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Years and months combined into a single month count.
    pub fn total_months(&self) -> Result<i64> {
        safe_add(safe_mul(self.years, 12)?, self.months)
    }

    pub fn negated(&self) -> Result<Self> {
        Ok(Self {
            years: safe_neg(self.years)?,
            months: safe_neg(self.months)?,
            days: safe_neg(self.days)?,
            hours: safe_neg(self.hours)?,
            minutes: safe_neg(self.minutes)?,
            seconds: safe_neg(self.seconds)?,
            nanos: safe_neg(self.nanos)?,
        })
    }

    /// Unit-wise sum of two periods.
    pub fn plus(&self, other: &Period) -> Result<Self> {
        Ok(Self {
            years: safe_add(self.years, other.years)?,
            months: safe_add(self.months, other.months)?,
            days: safe_add(self.days, other.days)?,
            hours: safe_add(self.hours, other.hours)?,
            minutes: safe_add(self.minutes, other.minutes)?,
            seconds: safe_add(self.seconds, other.seconds)?,
            nanos: safe_add(self.nanos, other.nanos)?,
        })
    }
}

/// ISO-8601 duration text such as `P1Y2M3DT4H5M6.5S`; zero prints as `PT0S`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        for (amount, unit) in [(self.years, 'Y'), (self.months, 'M'), (self.days, 'D')] {
            if amount != 0 {
                write!(f, "{}{}", amount, unit)?;
            }
        }
        if self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.nanos == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        for (amount, unit) in [(self.hours, 'H'), (self.minutes, 'M')] {
            if amount != 0 {
                write!(f, "{}{}", amount, unit)?;
            }
        }
        let total = self.seconds as i128 * 1_000_000_000 + self.nanos as i128;
        if total != 0 {
            if total < 0 {
                f.write_str("-")?;
            }
            let abs = total.unsigned_abs();
            write!(f, "{}", abs / 1_000_000_000)?;
            let fraction = (abs % 1_000_000_000) as u32;
            if fraction != 0 {
                let digits = format!("{:09}", fraction);
                write!(f, ".{}", digits.trim_end_matches('0'))?;
            }
            f.write_str("S")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_months_folds_years() {
        let period = Period::of_years(2).with_months(-3);
        assert_eq!(period.total_months(), Ok(21));
        assert!(Period::of_years(i64::MAX).total_months().is_err());
    }

    #[test]
    fn negation() {
        let period = Period::of_days(3).with_hours(-4);
        assert_eq!(period.negated().unwrap(), Period::of_days(-3).with_hours(4));
        assert!(Period::of_nanos(i64::MIN).negated().is_err());
    }

    #[test]
    fn weeks_are_days() {
        assert_eq!(Period::of_weeks(2).unwrap(), Period::of_days(14));
        assert!(Period::of_weeks(i64::MAX).is_err());
    }

    #[test]
    fn iso_text() {
        assert_eq!(Period::ZERO.to_string(), "PT0S");
        assert_eq!(Period::of_years(1).with_months(2).with_days(3).to_string(), "P1Y2M3D");
        assert_eq!(
            Period::of_hours(4).with_minutes(5).with_seconds(6).with_nanos(500_000_000).to_string(),
            "PT4H5M6.5S"
        );
        assert_eq!(Period::of_nanos(-1_500_000_000).to_string(), "PT-1.5S");
    }
}
