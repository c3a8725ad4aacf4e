//! Points on the UTC time-line.

use super::local::NANOS_PER_SECOND;
use super::offset::ZoneOffset;
use super::offset_date_time::OffsetDateTime;
use crate::common::math::{floor_div, floor_mod, safe_add, safe_mul};
use crate::common::{Error, ParseError, Result};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// An instantaneous point on the time-line, counted from 1970-01-01T00:00Z.
///
/// The seconds count is signed; the nanosecond adjustment is always in
/// `0..1_000_000_000`, so one nanosecond before the epoch is `(-1, 999_999_999)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Instant {
    seconds: i64,
    nanos: u32,
}

impl Instant {
    pub const EPOCH: Instant = Instant { seconds: 0, nanos: 0 };

    pub fn of_epoch_seconds(seconds: i64) -> Self {
        Self { seconds, nanos: 0 }
    }

    /// Create an instant from seconds and a signed nanosecond adjustment.
    ///
    /// The adjustment may be any value; it is floor-normalised into the
    /// seconds count.
    pub fn of_epoch_seconds_adjusted(seconds: i64, nano_adjustment: i64) -> Result<Self> {
        let seconds = safe_add(seconds, floor_div(nano_adjustment, NANOS_PER_SECOND))?;
        Ok(Self {
            seconds,
            nanos: floor_mod(nano_adjustment, NANOS_PER_SECOND) as u32,
        })
    }

    /// `nanos` must already be normalised below one second.
    pub(crate) const fn from_parts(seconds: i64, nanos: u32) -> Self {
        Self { seconds, nanos }
    }

    pub fn of_epoch_millis(millis: i64) -> Self {
        Self {
            seconds: floor_div(millis, 1000),
            nanos: floor_mod(millis, 1000) as u32 * 1_000_000,
        }
    }

    #[inline]
    pub fn epoch_seconds(&self) -> i64 {
        self.seconds
    }

    /// Nanosecond of the second, always non-negative.
    #[inline]
    pub fn nanos(&self) -> u32 {
        self.nanos
    }

    pub fn to_epoch_millis(&self) -> Result<i64> {
        safe_add(safe_mul(self.seconds, 1000)?, (self.nanos / 1_000_000) as i64)
    }

    pub fn plus_seconds(&self, seconds: i64) -> Result<Self> {
        Ok(Self {
            seconds: safe_add(self.seconds, seconds)?,
            nanos: self.nanos,
        })
    }

    pub fn plus_nanos(&self, nanos: i64) -> Result<Self> {
        let seconds = safe_add(self.seconds, floor_div(nanos, NANOS_PER_SECOND))?;
        let nanos = floor_mod(nanos, NANOS_PER_SECOND) + self.nanos as i64;
        Self::of_epoch_seconds_adjusted(seconds, nanos)
    }

    /// Convert to a `chrono` UTC date-time.
    pub fn to_utc(&self) -> Result<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos).ok_or_else(|| {
            Error::overflow(format!("instant {}s is outside the supported range", self.seconds))
        })
    }

    /// Local date-time of this instant at `offset`.
    pub fn at_offset(&self, offset: ZoneOffset) -> Result<OffsetDateTime> {
        OffsetDateTime::from_instant(*self, offset)
    }

    /// Parse either text form produced by [`Display`](fmt::Display): ISO
    /// offset date-time text, or `<seconds>.<nanos>s` for instants beyond
    /// the calendar's year span.
    pub fn parse(text: &str) -> Result<Self> {
        match text.strip_suffix('s') {
            Some(counter) => Self::parse_counter(text, counter),
            None => Ok(OffsetDateTime::parse(text)?.to_instant()),
        }
    }

    fn parse_counter(text: &str, counter: &str) -> Result<Self> {
        let (seconds, nanos) = counter
            .split_once('.')
            .ok_or_else(|| ParseError::new(text, counter.len(), "expected '.'"))?;
        let seconds = seconds
            .parse::<i64>()
            .map_err(|_| ParseError::new(text, 0, "expected seconds"))?;
        let at = counter.len() - nanos.len();
        if nanos.len() != 9 || !nanos.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::new(text, at, "expected 9 digits").into());
        }
        let nanos = nanos
            .parse::<u32>()
            .map_err(|_| ParseError::new(text, at, "expected 9 digits"))?;
        Ok(Self { seconds, nanos })
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(value: DateTime<Utc>) -> Self {
        Self {
            seconds: value.timestamp(),
            nanos: value.timestamp_subsec_nanos() % 1_000_000_000,
        }
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.at_offset(ZoneOffset::UTC) {
            Ok(date_time) => fmt::Display::fmt(&date_time, f),
            Err(_) => write!(f, "{}.{:09}s", self.seconds, self.nanos),
        }
    }
}

impl FromStr for Instant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Instant {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Instant {
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

    #[test]
    fn adjustment_is_floor_normalised() {
        let instant = Instant::of_epoch_seconds_adjusted(0, -1).unwrap();
        assert_eq!(instant.epoch_seconds(), -1);
        assert_eq!(instant.nanos(), 999_999_999);

        let instant = Instant::of_epoch_seconds_adjusted(3, 2_500_000_000).unwrap();
        assert_eq!((instant.epoch_seconds(), instant.nanos()), (5, 500_000_000));

        assert!(Instant::of_epoch_seconds_adjusted(i64::MAX, NANOS_PER_SECOND).is_err());
    }

    #[test]
    fn millis() {
        let instant = Instant::of_epoch_millis(-1);
        assert_eq!((instant.epoch_seconds(), instant.nanos()), (-1, 999_000_000));
        assert_eq!(instant.to_epoch_millis(), Ok(-1));
        assert_eq!(Instant::of_epoch_millis(1_500).to_epoch_millis(), Ok(1_500));
    }

    #[test]
    fn plus_nanos_carries() {
        let instant = Instant::of_epoch_seconds_adjusted(10, 900_000_000).unwrap();
        let later = instant.plus_nanos(200_000_000).unwrap();
        assert_eq!((later.epoch_seconds(), later.nanos()), (11, 100_000_000));
        let earlier = instant.plus_nanos(-1_000_000_000).unwrap();
        assert_eq!((earlier.epoch_seconds(), earlier.nanos()), (9, 900_000_000));
    }

    #[test]
    fn ordering_uses_nanos() {
        let a = Instant::of_epoch_seconds_adjusted(-1, 999_999_999).unwrap();
        assert!(a < Instant::EPOCH);
        assert!(Instant::EPOCH < Instant::of_epoch_seconds_adjusted(0, 1).unwrap());
    }

    #[test]
    fn chrono_interop_and_display() {
        let instant = Instant::of_epoch_seconds(-86_400);
        let utc = instant.to_utc().unwrap();
        assert_eq!(Instant::from(utc), instant);
        assert_eq!(instant.to_string(), "1969-12-31T00:00:00Z");
        assert_eq!(Instant::of_epoch_seconds(1_196_676_930).to_string(), "2007-12-03T10:15:30Z");
    }

    #[test]
    fn display_text_parses_back() {
        let near = Instant::of_epoch_seconds_adjusted(1_196_676_930, 5).unwrap();
        assert_eq!(near.to_string().parse::<Instant>().unwrap(), near);

        let far = Instant::of_epoch_seconds_adjusted(i64::MIN / 2, 7).unwrap();
        let text = far.to_string();
        assert_eq!(text, format!("{}.000000007s", i64::MIN / 2));
        assert_eq!(Instant::parse(&text).unwrap(), far);

        assert!(matches!(Instant::parse("12.5s"), Err(Error::Parse(ref e)) if e.index() == 3));
        assert!(Instant::parse("12s").is_err());
        assert!(Instant::parse("2007-12-03T10:15:30").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_accepts_display_text() {
        use serde::Deserialize;
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error as ValueError, StrDeserializer};

        for instant in [Instant::of_epoch_millis(-1), Instant::of_epoch_seconds(i64::MAX)] {
            let text = instant.to_string();
            let de: StrDeserializer<'_, ValueError> = text.as_str().into_deserializer();
            assert_eq!(Instant::deserialize(de).unwrap(), instant);
        }
    }
}
