//! Event configuration: the immutable constraints of one scheduling run.
//!
//! Single-day and multi-day events carry disjoint option sets, so they are
//! modeled as variants of [`EventKind`] rather than a struct of optionals.
//! String forms ("2-hours", "1-week", "weekends-only") parse via [`FromStr`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::offset::TimezoneOffset;
use crate::period::DayPeriod;

/// Discriminant of [`EventKind`], as named on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    SingleDay,
    MultiDay,
}

impl FromStr for EventType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "single-day" => Ok(EventType::SingleDay),
            "multi-day" => Ok(EventType::MultiDay),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown event type '{}'",
                other
            ))),
        }
    }
}

/// Preferred time of day for a single-day event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PreferredTime {
    Morning,
    Afternoon,
    Evening,
    #[default]
    Anytime,
}

impl PreferredTime {
    /// The period this preference restricts to, or `None` for anytime.
    pub fn period(self) -> Option<DayPeriod> {
        match self {
            PreferredTime::Morning => Some(DayPeriod::Morning),
            PreferredTime::Afternoon => Some(DayPeriod::Afternoon),
            PreferredTime::Evening => Some(DayPeriod::Evening),
            PreferredTime::Anytime => None,
        }
    }

    /// Local hour bounds candidates must fall within. Anytime spans the whole day.
    pub fn hour_bounds(self) -> (u32, u32) {
        self.period().map_or((0, 24), DayPeriod::hour_bounds)
    }
}

impl FromStr for PreferredTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "morning" => Ok(PreferredTime::Morning),
            "afternoon" => Ok(PreferredTime::Afternoon),
            "evening" => Ok(PreferredTime::Evening),
            "anytime" => Ok(PreferredTime::Anytime),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown preferred time '{}'",
                other
            ))),
        }
    }
}

/// Length of a single-day meeting, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct MeetingDuration(u32);

impl MeetingDuration {
    pub fn from_minutes(minutes: u32) -> Result<Self> {
        if minutes == 0 || minutes > 24 * 60 {
            return Err(EngineError::InvalidDuration(format!(
                "{} minutes is outside 1..=1440",
                minutes
            )));
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }

    pub fn as_chrono(self) -> chrono::Duration {
        chrono::Duration::minutes(self.0 as i64)
    }
}

impl FromStr for MeetingDuration {
    type Err = EngineError;

    /// Accepts "half-day", "full-day", "<n>-minute(s)", "<n>-hour(s)" or a bare
    /// minute count.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        let minutes = match s.as_str() {
            "half-day" => 240,
            "full-day" => 480,
            _ => {
                let (count, unit) = split_count_unit(&s)
                    .ok_or_else(|| EngineError::InvalidDuration(s.clone()))?;
                match unit {
                    "" | "min" | "mins" | "minute" | "minutes" => count,
                    "hour" | "hours" => count.saturating_mul(60),
                    _ => return Err(EngineError::InvalidDuration(s.clone())),
                }
            }
        };
        Self::from_minutes(minutes)
    }
}

impl TryFrom<u32> for MeetingDuration {
    type Error = EngineError;

    fn try_from(minutes: u32) -> Result<Self> {
        Self::from_minutes(minutes)
    }
}

impl From<MeetingDuration> for u32 {
    fn from(duration: MeetingDuration) -> Self {
        duration.0
    }
}

impl fmt::Display for MeetingDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.0)
    }
}

/// Length of a multi-day event, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct EventLength(u32);

impl EventLength {
    pub fn from_days(days: u32) -> Result<Self> {
        if days == 0 {
            return Err(EngineError::InvalidEventLength(
                "event length must be at least one day".to_string(),
            ));
        }
        Ok(Self(days))
    }

    pub fn days(self) -> u32 {
        self.0
    }
}

impl FromStr for EventLength {
    type Err = EngineError;

    /// Accepts "<n>-day(s)", "<n>-week(s)" or a bare day count.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        let (count, unit) =
            split_count_unit(&s).ok_or_else(|| EngineError::InvalidEventLength(s.clone()))?;
        let days = match unit {
            "" | "day" | "days" => count,
            "week" | "weeks" => count.saturating_mul(7),
            _ => return Err(EngineError::InvalidEventLength(s.clone())),
        };
        Self::from_days(days)
    }
}

impl TryFrom<u32> for EventLength {
    type Error = EngineError;

    fn try_from(days: u32) -> Result<Self> {
        Self::from_days(days)
    }
}

impl From<EventLength> for u32 {
    fn from(length: EventLength) -> Self {
        length.0
    }
}

/// Which days a multi-day window may cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimingPreference {
    WeekdaysOnly,
    WeekendsOnly,
    Consecutive,
    #[default]
    Anytime,
}

impl TimingPreference {
    /// Whether a single day may be part of a window under this preference.
    pub fn allows(self, date: NaiveDate) -> bool {
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        match self {
            TimingPreference::WeekdaysOnly => !weekend,
            TimingPreference::WeekendsOnly => weekend,
            // Windows are contiguous by construction.
            TimingPreference::Consecutive | TimingPreference::Anytime => true,
        }
    }
}

impl FromStr for TimingPreference {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "weekdays-only" => Ok(TimingPreference::WeekdaysOnly),
            "weekends-only" => Ok(TimingPreference::WeekendsOnly),
            "consecutive" => Ok(TimingPreference::Consecutive),
            "anytime" => Ok(TimingPreference::Anytime),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown timing preference '{}'",
                other
            ))),
        }
    }
}

/// Event-type specific constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "kebab-case")]
pub enum EventKind {
    #[serde(rename_all = "camelCase")]
    SingleDay {
        preferred_time: PreferredTime,
        duration: MeetingDuration,
    },
    #[serde(rename_all = "camelCase")]
    MultiDay {
        event_length: EventLength,
        timing_preference: TimingPreference,
    },
}

/// Immutable configuration of one event being scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    pub id: String,
    /// First candidate date, inclusive.
    pub availability_start_date: NaiveDate,
    /// Last candidate date, inclusive.
    pub availability_end_date: NaiveDate,
    #[serde(flatten)]
    pub kind: EventKind,
}

impl EventConfig {
    pub fn single_day(
        id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        preferred_time: PreferredTime,
        duration: MeetingDuration,
    ) -> Self {
        Self {
            id: id.into(),
            availability_start_date: start,
            availability_end_date: end,
            kind: EventKind::SingleDay {
                preferred_time,
                duration,
            },
        }
    }

    pub fn multi_day(
        id: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        event_length: EventLength,
        timing_preference: TimingPreference,
    ) -> Self {
        Self {
            id: id.into(),
            availability_start_date: start,
            availability_end_date: end,
            kind: EventKind::MultiDay {
                event_length,
                timing_preference,
            },
        }
    }

    pub fn event_type(&self) -> EventType {
        match self.kind {
            EventKind::SingleDay { .. } => EventType::SingleDay,
            EventKind::MultiDay { .. } => EventType::MultiDay,
        }
    }

    /// Number of dates in the availability range; 0 when the range is inverted.
    pub fn day_count(&self) -> u32 {
        let span = (self.availability_end_date - self.availability_start_date).num_days();
        if span < 0 {
            0
        } else {
            span as u32 + 1
        }
    }

    /// Every date of the availability range in order. Empty when inverted.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        self.availability_start_date
            .iter_days()
            .take(self.day_count() as usize)
    }

    /// UTC bounds of the whole availability range in the viewer's local time.
    ///
    /// `None` when the range is inverted.
    pub fn window(&self, offset: TimezoneOffset) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        if self.day_count() == 0 {
            return None;
        }
        Some((
            offset.at_local_hour(self.availability_start_date, 0),
            offset.at_local_hour(self.availability_end_date, 24),
        ))
    }
}

/// Split "3-days" into `(3, "days")`. A bare number yields an empty unit.
fn split_count_unit(s: &str) -> Option<(u32, &str)> {
    let (count, unit) = match s.split_once('-') {
        Some((count, unit)) => (count, unit),
        None => (s, ""),
    };
    count.trim().parse::<u32>().ok().map(|n| (n, unit.trim()))
}
