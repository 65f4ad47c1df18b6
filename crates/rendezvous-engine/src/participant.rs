//! Participants and their submitted availability slots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::score::percentage;

/// One submitted availability interval, `[start, end)` in UTC.
///
/// Construction guarantees `end > start`; slots are never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTimeSlot")]
pub struct TimeSlot {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTimeSlot {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = EngineError;

    fn try_from(raw: RawTimeSlot) -> Result<Self> {
        TimeSlot::new(raw.start_time, raw.end_time)
    }
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end <= start {
            return Err(EngineError::InvalidTimeSlot(format!(
                "end {} is not after start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self {
            start_time: start,
            end_time: end,
        })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && self.end_time > start
    }

    /// Whether this slot alone contains all of `[start, end)`.
    pub fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time <= start && self.end_time >= end
    }
}

/// An invitee and the availability they submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub time_slots: Vec<TimeSlot>,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>, time_slots: Vec<TimeSlot>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time_slots,
        }
    }

    /// A participant has responded once they submitted at least one slot.
    pub fn has_responded(&self) -> bool {
        !self.time_slots.is_empty()
    }
}

/// Headline response numbers shown next to recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSummary {
    pub total_participants: usize,
    pub responded: usize,
    pub pending: usize,
    /// Rounded percentage of invitees who responded.
    pub response_rate: u8,
}

/// Count responders and non-responders among the invited set.
pub fn summarize_responses(participants: &[Participant]) -> ResponseSummary {
    let total_participants = participants.len();
    let responded = participants.iter().filter(|p| p.has_responded()).count();
    ResponseSummary {
        total_participants,
        responded,
        pending: total_participants - responded,
        response_rate: percentage(responded, total_participants),
    }
}
