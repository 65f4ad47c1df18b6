//! Fixed viewer-local offsets for wall-clock bucketing.
//!
//! All instants in the engine are UTC. Period boundaries ("morning starts at
//! 06:00") and calendar days are wall-clock concepts, so they are evaluated in
//! the viewer's local time by shifting with a caller-supplied fixed offset.
//! There is no timezone database: an offset is just a signed minute count.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Largest accepted magnitude, exclusive (one full day).
const MAX_OFFSET_MINUTES: i32 = 24 * 60;

/// A fixed offset in minutes **east** of UTC (`local = utc + offset`).
///
/// UTC+02:00 is `120`, UTC-05:00 is `-300`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct TimezoneOffset(i32);

impl TimezoneOffset {
    /// UTC itself.
    pub const UTC: TimezoneOffset = TimezoneOffset(0);

    /// Build an offset, rejecting magnitudes of a day or more.
    pub fn from_minutes(minutes: i32) -> Result<Self> {
        if minutes.abs() >= MAX_OFFSET_MINUTES {
            return Err(EngineError::InvalidTimezoneOffset(minutes));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> i32 {
        self.0
    }

    /// Wall-clock time of `instant` as seen by the viewer.
    pub fn to_local(self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.naive_utc() + Duration::minutes(self.0 as i64)
    }

    /// The viewer's calendar date containing `instant`.
    pub fn local_date(self, instant: DateTime<Utc>) -> NaiveDate {
        self.to_local(instant).date()
    }

    /// The UTC instant at which the viewer's clock reads `local`.
    pub fn to_utc(self, local: NaiveDateTime) -> DateTime<Utc> {
        (local - Duration::minutes(self.0 as i64)).and_utc()
    }

    /// UTC instant of `hour` o'clock local time on `date`.
    ///
    /// `hour` may be 24, meaning local midnight at the end of `date`.
    pub fn at_local_hour(self, date: NaiveDate, hour: u32) -> DateTime<Utc> {
        self.to_utc(date.and_time(NaiveTime::MIN) + Duration::hours(hour as i64))
    }

    /// Half-open UTC range `[start, end)` covering the viewer's local `date`.
    pub fn local_day_bounds(self, date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        (self.at_local_hour(date, 0), self.at_local_hour(date, 24))
    }
}

impl TryFrom<i32> for TimezoneOffset {
    type Error = EngineError;

    fn try_from(minutes: i32) -> Result<Self> {
        Self::from_minutes(minutes)
    }
}

impl From<TimezoneOffset> for i32 {
    fn from(offset: TimezoneOffset) -> Self {
        offset.0
    }
}
