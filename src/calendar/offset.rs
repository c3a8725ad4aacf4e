//! Fixed offsets from UTC.

use super::field::{Field, MAX_OFFSET_SECONDS};
use crate::common::{Error, ParseError, Result};
use std::fmt;
use std::str::FromStr;

/// A fixed displacement of local time from UTC, in seconds east of Greenwich.
///
/// The amount is bounded to ±18:00 and carries no transition history; zones
/// with changing offsets are modelled by [`TimeZone`](super::TimeZone).
///
/// # Examples
///
/// ```
/// use calendrical::ZoneOffset;
///
/// let offset = ZoneOffset::of_hours_minutes(5, 30).unwrap();
/// assert_eq!(offset.total_seconds(), 19_800);
/// assert_eq!(offset.to_string(), "+05:30");
/// assert_eq!("+05:30".parse::<ZoneOffset>().unwrap(), offset);
/// assert_eq!(ZoneOffset::UTC.to_string(), "Z");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneOffset {
    total_seconds: i32,
}

impl ZoneOffset {
    /// The zero offset.
    pub const UTC: ZoneOffset = ZoneOffset { total_seconds: 0 };
    /// The largest negative offset, -18:00.
    pub const MIN: ZoneOffset = ZoneOffset {
        total_seconds: -MAX_OFFSET_SECONDS,
    };
    /// The largest positive offset, +18:00.
    pub const MAX: ZoneOffset = ZoneOffset {
        total_seconds: MAX_OFFSET_SECONDS,
    };

    /// Create an offset from a total amount of seconds.
    ///
    /// # Errors
    ///
    /// [`Error::FieldOutOfRange`] when the amount exceeds ±18:00.
    pub fn of_total_seconds(total_seconds: i32) -> Result<Self> {
        Field::OffsetSeconds.check(total_seconds as i64)?;
        Ok(Self { total_seconds })
    }

    pub fn of_hours(hours: i32) -> Result<Self> {
        Self::of_hms(hours, 0, 0)
    }

    pub fn of_hours_minutes(hours: i32, minutes: i32) -> Result<Self> {
        Self::of_hms(hours, minutes, 0)
    }

    /// Create an offset from hours, minutes and seconds.
    ///
    /// All three components must share a sign: `-5, -30, 0` is -05:30.
    pub fn of_hms(hours: i32, minutes: i32, seconds: i32) -> Result<Self> {
        if !(-18..=18).contains(&hours) {
            return Err(Error::invalid(
                Field::OffsetSeconds,
                hours as i64,
                "offset hours must be within -18 to 18",
            ));
        }
        if !(-59..=59).contains(&minutes) || !(-59..=59).contains(&seconds) {
            return Err(Error::invalid(
                Field::OffsetSeconds,
                (if (-59..=59).contains(&minutes) { seconds } else { minutes }) as i64,
                "offset minutes and seconds must be within -59 to 59",
            ));
        }
        let signs = [hours.signum(), minutes.signum(), seconds.signum()];
        if signs.contains(&1) && signs.contains(&-1) {
            return Err(Error::invalid(
                Field::OffsetSeconds,
                minutes as i64,
                "offset hours, minutes and seconds must share a sign",
            ));
        }
        Self::of_total_seconds(hours * 3600 + minutes * 60 + seconds)
    }

    /// Parse an offset id: `Z`, `±h`, `±hh`, `±hh:mm`, `±hhmm`, `±hh:mm:ss` or `±hhmmss`.
    pub fn parse(id: &str) -> Result<Self> {
        if id == "Z" {
            return Ok(Self::UTC);
        }
        let bytes = id.as_bytes();
        let sign = match bytes.first() {
            Some(b'+') => 1,
            Some(b'-') => -1,
            _ => return Err(ParseError::new(id, 0, "expected '+', '-' or 'Z'").into()),
        };
        let colon = |at: usize| -> Result<()> {
            if bytes[at] == b':' {
                Ok(())
            } else {
                Err(ParseError::new(id, at, "expected ':'").into())
            }
        };
        let (hours, minutes, seconds) = match bytes.len() {
            2 => (digits(id, 1, 1)?, 0, 0),
            3 => (digits(id, 1, 2)?, 0, 0),
            5 => (digits(id, 1, 2)?, digits(id, 3, 2)?, 0),
            6 => {
                colon(3)?;
                (digits(id, 1, 2)?, digits(id, 4, 2)?, 0)
            },
            7 => (digits(id, 1, 2)?, digits(id, 3, 2)?, digits(id, 5, 2)?),
            9 => {
                colon(3)?;
                colon(6)?;
                (digits(id, 1, 2)?, digits(id, 4, 2)?, digits(id, 7, 2)?)
            },
            len => return Err(ParseError::new(id, len.min(1), "invalid offset id length").into()),
        };
        Self::of_hms(sign * hours, sign * minutes, sign * seconds)
    }

    #[inline]
    pub fn total_seconds(&self) -> i32 {
        self.total_seconds
    }

    /// Hours component, carrying the sign of the offset.
    #[inline]
    pub fn hours_part(&self) -> i32 {
        self.total_seconds / 3600
    }

    /// Minutes component, carrying the sign of the offset.
    #[inline]
    pub fn minutes_part(&self) -> i32 {
        (self.total_seconds / 60) % 60
    }

    /// Seconds component, carrying the sign of the offset.
    #[inline]
    pub fn seconds_part(&self) -> i32 {
        self.total_seconds % 60
    }

    /// The normalised id: `Z`, `±hh:mm` or `±hh:mm:ss`.
    pub fn id(&self) -> String {
        if self.total_seconds == 0 {
            return "Z".to_string();
        }
        let mut id = String::with_capacity(9);
        write_offset(&mut id, *self, true, true);
        id
    }
}

/// Append `±hh[:]mm[[:]ss]` to `out`; seconds only when non-zero and allowed.
pub(crate) fn write_offset(out: &mut String, offset: ZoneOffset, colon: bool, seconds: bool) {
    let total = offset.total_seconds();
    let abs = total.unsigned_abs();
    out.push(if total < 0 { '-' } else { '+' });
    push_two(out, abs / 3600);
    if colon {
        out.push(':');
    }
    push_two(out, (abs / 60) % 60);
    if seconds && abs % 60 != 0 {
        if colon {
            out.push(':');
        }
        push_two(out, abs % 60);
    }
}

fn push_two(out: &mut String, value: u32) {
    if value < 10 {
        out.push('0');
    }
    let mut buf = itoa::Buffer::new();
    out.push_str(buf.format(value));
}

fn digits(text: &str, at: usize, len: usize) -> Result<i32> {
    let mut value = 0;
    for (i, b) in text.as_bytes()[at..at + len].iter().enumerate() {
        if !b.is_ascii_digit() {
            return Err(ParseError::new(text, at + i, "expected digit").into());
        }
        value = value * 10 + (b - b'0') as i32;
    }
    Ok(value)
}

impl Default for ZoneOffset {
    fn default() -> Self {
        Self::UTC
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for ZoneOffset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<chrono::FixedOffset> for ZoneOffset {
    type Error = Error;

    fn try_from(offset: chrono::FixedOffset) -> Result<Self> {
        Self::of_total_seconds(offset.local_minus_utc())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ZoneOffset {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ZoneOffset {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let id = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::parse(&id).map_err(serde::de::Error::custom)
    }
}
