//! Time-zones and local time-line resolution.
//!
//! A [`TimeZone`] is either a fixed offset or, with the `tzdb` feature, a
//! region from the IANA database (via `chrono-tz`). Regions have gaps (local
//! times skipped when clocks go forward) and overlaps (local times repeated
//! when clocks go back); a [`ZoneResolver`] decides which offset a local
//! date-time receives in either case.

use super::instant::Instant;
use super::local::plus_seconds;
use super::offset::ZoneOffset;
use super::offset_date_time::OffsetDateTime;
use crate::common::{Error, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Half-width of the window searched for a transition around a local date-time.
#[cfg(feature = "tzdb")]
const TRANSITION_WINDOW: i64 = 2 * super::local::SECONDS_PER_DAY;

/// A time-zone: the rules mapping instants to offsets.
///
/// # Examples
///
/// ```
/// use calendrical::{TimeZone, ZoneOffset};
///
/// let zone = TimeZone::of("UTC+01:00").unwrap();
/// assert_eq!(zone, TimeZone::Fixed(ZoneOffset::of_hours(1).unwrap()));
/// assert_eq!(zone.id(), "UTC+01:00");
/// assert_eq!(TimeZone::of("Z").unwrap(), TimeZone::UTC);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeZone {
    Fixed(ZoneOffset),
    #[cfg(feature = "tzdb")]
    Region(chrono_tz::Tz),
}

impl TimeZone {
    pub const UTC: TimeZone = TimeZone::Fixed(ZoneOffset::UTC);

    pub fn fixed(offset: ZoneOffset) -> Self {
        Self::Fixed(offset)
    }

    /// Look up a zone by id.
    ///
    /// Accepts `Z`, `UTC`, `GMT`, `UT`, those prefixes followed by an offset id
    /// (`UTC+01:00`), a bare offset id (`-05:00`), or a region name
    /// (`Europe/Paris`).
    ///
    /// # Errors
    ///
    /// [`Error::UnknownZone`] when the id matches none of those forms.
    pub fn of(id: &str) -> Result<Self> {
        if matches!(id, "Z" | "UTC" | "GMT" | "UT") {
            return Ok(Self::UTC);
        }
        for prefix in ["UTC", "GMT", "UT"] {
            if let Some(rest) = id.strip_prefix(prefix)
                && rest.starts_with(['+', '-'])
            {
                return Self::offset_id(id, rest);
            }
        }
        if id.starts_with(['+', '-']) {
            return Self::offset_id(id, id);
        }
        Self::region(id)
    }

    fn offset_id(id: &str, offset: &str) -> Result<Self> {
        ZoneOffset::parse(offset)
            .map(Self::Fixed)
            .map_err(|_| Error::UnknownZone(id.to_string()))
    }

    #[cfg(feature = "tzdb")]
    fn region(id: &str) -> Result<Self> {
        id.parse::<chrono_tz::Tz>()
            .map(Self::Region)
            .map_err(|_| Error::UnknownZone(id.to_string()))
    }

    #[cfg(not(feature = "tzdb"))]
    fn region(id: &str) -> Result<Self> {
        Err(Error::UnknownZone(id.to_string()))
    }

    /// The zone id; fixed zones render as `UTC` or `UTC±hh:mm`.
    pub fn id(&self) -> String {
        match self {
            Self::Fixed(offset) if *offset == ZoneOffset::UTC => "UTC".to_string(),
            Self::Fixed(offset) => format!("UTC{}", offset.id()),
            #[cfg(feature = "tzdb")]
            Self::Region(tz) => tz.name().to_string(),
        }
    }

    /// The offset when the zone never changes it.
    pub fn fixed_offset(&self) -> Option<ZoneOffset> {
        match self {
            Self::Fixed(offset) => Some(*offset),
            #[cfg(feature = "tzdb")]
            Self::Region(_) => None,
        }
    }

    /// The offset in effect at `instant`.
    pub fn offset_at(&self, instant: Instant) -> Result<ZoneOffset> {
        match self {
            Self::Fixed(offset) => Ok(*offset),
            #[cfg(feature = "tzdb")]
            Self::Region(tz) => {
                use chrono::{Offset, TimeZone as _};
                let utc = instant.to_utc()?;
                ZoneOffset::try_from(tz.offset_from_utc_datetime(&utc.naive_utc()).fix())
            },
        }
    }

    /// Classify a local date-time against the zone's transitions.
    pub fn resolve_local(&self, local: NaiveDateTime) -> Result<LocalResolution> {
        match self {
            Self::Fixed(offset) => Ok(LocalResolution::Unique(*offset)),
            #[cfg(feature = "tzdb")]
            Self::Region(tz) => {
                use chrono::{LocalResult, Offset, TimeZone as _};
                match tz.offset_from_local_datetime(&local) {
                    LocalResult::Single(offset) => {
                        Ok(LocalResolution::Unique(ZoneOffset::try_from(offset.fix())?))
                    },
                    LocalResult::Ambiguous(_, _) => {
                        Ok(LocalResolution::Overlap(self.transition_near(local)?))
                    },
                    LocalResult::None => Ok(LocalResolution::Gap(self.transition_near(local)?)),
                }
            },
        }
    }

    /// Locate the transition closest to `local` by bisecting the instants
    /// around it.
    #[cfg(feature = "tzdb")]
    fn transition_near(&self, local: NaiveDateTime) -> Result<Transition> {
        use super::local::{SECONDS_PER_DAY, epoch_day, second_of_day};
        let around = epoch_day(local.date()) * SECONDS_PER_DAY + second_of_day(local.time());
        let (mut lo, mut hi) = (around - TRANSITION_WINDOW, around + TRANSITION_WINDOW);
        let offset_before = self.offset_at(Instant::of_epoch_seconds(lo))?;
        let offset_after = self.offset_at(Instant::of_epoch_seconds(hi))?;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.offset_at(Instant::of_epoch_seconds(mid))? == offset_before {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Ok(Transition {
            instant: Instant::of_epoch_seconds(hi),
            offset_before,
            offset_after,
        })
    }

    /// Resolve a local date-time to an offset date-time in this zone.
    ///
    /// Unique local times keep their fields; gaps and overlaps are handed to
    /// `resolver`, which may consult the `previous` offset of the value being
    /// converted.
    pub fn resolve(
        &self,
        local: NaiveDateTime,
        resolver: &dyn ZoneResolver,
        previous: Option<ZoneOffset>,
    ) -> Result<OffsetDateTime> {
        match self.resolve_local(local)? {
            LocalResolution::Unique(offset) => OffsetDateTime::from_local(local, offset),
            LocalResolution::Gap(transition) => {
                debug!(
                    zone = %self,
                    local = %local,
                    before = %transition.offset_before,
                    after = %transition.offset_after,
                    "resolving local date-time in a gap"
                );
                resolver.handle_gap(self, local, &transition, previous)
            },
            LocalResolution::Overlap(transition) => {
                debug!(
                    zone = %self,
                    local = %local,
                    before = %transition.offset_before,
                    after = %transition.offset_after,
                    "resolving local date-time in an overlap"
                );
                resolver.handle_overlap(self, local, &transition, previous)
            },
        }
    }
}

impl fmt::Display for TimeZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

impl FromStr for TimeZone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::of(s)
    }
}

impl From<ZoneOffset> for TimeZone {
    fn from(offset: ZoneOffset) -> Self {
        Self::Fixed(offset)
    }
}

#[cfg(feature = "tzdb")]
impl From<chrono_tz::Tz> for TimeZone {
    fn from(tz: chrono_tz::Tz) -> Self {
        Self::Region(tz)
    }
}

/// How a local date-time maps onto a zone's time-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalResolution {
    /// Exactly one valid offset
    Unique(ZoneOffset),
    /// The local date-time was skipped
    Gap(Transition),
    /// The local date-time occurs twice
    Overlap(Transition),
}

/// A change of offset at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transition {
    instant: Instant,
    offset_before: ZoneOffset,
    offset_after: ZoneOffset,
}

impl Transition {
    pub fn new(instant: Instant, offset_before: ZoneOffset, offset_after: ZoneOffset) -> Self {
        Self {
            instant,
            offset_before,
            offset_after,
        }
    }

    pub fn instant(&self) -> Instant {
        self.instant
    }

    pub fn offset_before(&self) -> ZoneOffset {
        self.offset_before
    }

    pub fn offset_after(&self) -> ZoneOffset {
        self.offset_after
    }

    pub fn is_gap(&self) -> bool {
        self.offset_after > self.offset_before
    }

    pub fn is_overlap(&self) -> bool {
        self.offset_after < self.offset_before
    }

    /// Seconds the local clock jumps by; positive for gaps.
    pub fn length_seconds(&self) -> i64 {
        (self.offset_after.total_seconds() - self.offset_before.total_seconds()) as i64
    }

    /// Whether `offset` is valid for local times inside this transition.
    pub fn is_valid_offset(&self, offset: ZoneOffset) -> bool {
        self.is_overlap() && (offset == self.offset_before || offset == self.offset_after)
    }

    /// The transition instant expressed with the offset before it.
    pub fn date_time_before(&self) -> Result<OffsetDateTime> {
        OffsetDateTime::from_instant(self.instant, self.offset_before)
    }

    /// The transition instant expressed with the offset after it.
    pub fn date_time_after(&self) -> Result<OffsetDateTime> {
        OffsetDateTime::from_instant(self.instant, self.offset_after)
    }
}

/// Strategy for local date-times that fall in a gap or an overlap.
pub trait ZoneResolver: Send + Sync {
    fn handle_gap(
        &self,
        zone: &TimeZone,
        local: NaiveDateTime,
        transition: &Transition,
        previous: Option<ZoneOffset>,
    ) -> Result<OffsetDateTime>;

    fn handle_overlap(
        &self,
        zone: &TimeZone,
        local: NaiveDateTime,
        transition: &Transition,
        previous: Option<ZoneOffset>,
    ) -> Result<OffsetDateTime>;
}

/// Stock zone resolvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZoneResolvers {
    /// Reject gaps and overlaps with [`Error::ZoneResolution`]
    Strict,
    /// Last instant before a gap; earlier offset in an overlap
    PreTransition,
    /// First instant after a gap; later offset in an overlap
    #[default]
    PostTransition,
    /// First instant after a gap; earlier offset in an overlap
    PostGapPreOverlap,
    /// Keep the previous offset in an overlap when it is valid; first instant after a gap
    RetainOffset,
    /// Shift the local time forward by the length of a gap; keep the previous
    /// offset in an overlap when it is valid
    PushForward,
}

impl ZoneResolver for ZoneResolvers {
    fn handle_gap(
        &self,
        zone: &TimeZone,
        local: NaiveDateTime,
        transition: &Transition,
        _previous: Option<ZoneOffset>,
    ) -> Result<OffsetDateTime> {
        match self {
            Self::Strict => Err(Error::ZoneResolution(format!(
                "local date-time {} does not exist in zone {} due to a gap",
                local, zone
            ))),
            Self::PreTransition => {
                let before = transition.instant.plus_nanos(-1)?;
                OffsetDateTime::from_instant(before, transition.offset_before)
            },
            Self::PostTransition | Self::PostGapPreOverlap | Self::RetainOffset => {
                transition.date_time_after()
            },
            Self::PushForward => OffsetDateTime::from_local(
                plus_seconds(local, transition.length_seconds())?,
                transition.offset_after,
            ),
        }
    }

    fn handle_overlap(
        &self,
        zone: &TimeZone,
        local: NaiveDateTime,
        transition: &Transition,
        previous: Option<ZoneOffset>,
    ) -> Result<OffsetDateTime> {
        let offset = match self {
            Self::Strict => {
                return Err(Error::ZoneResolution(format!(
                    "local date-time {} is ambiguous in zone {} due to an overlap",
                    local, zone
                )));
            },
            Self::PreTransition | Self::PostGapPreOverlap => transition.offset_before,
            Self::PostTransition => transition.offset_after,
            Self::RetainOffset | Self::PushForward => match previous {
                Some(offset) if transition.is_valid_offset(offset) => offset,
                _ => transition.offset_after,
            },
        };
        OffsetDateTime::from_local(local, offset)
    }
}

impl<R: ZoneResolver + ?Sized> ZoneResolver for &R {
    fn handle_gap(
        &self,
        zone: &TimeZone,
        local: NaiveDateTime,
        transition: &Transition,
        previous: Option<ZoneOffset>,
    ) -> Result<OffsetDateTime> {
        (**self).handle_gap(zone, local, transition, previous)
    }

    fn handle_overlap(
        &self,
        zone: &TimeZone,
        local: NaiveDateTime,
        transition: &Transition,
        previous: Option<ZoneOffset>,
    ) -> Result<OffsetDateTime> {
        (**self).handle_overlap(zone, local, transition, previous)
    }
}
