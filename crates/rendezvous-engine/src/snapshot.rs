//! JSON boundary: the read-only snapshot an API layer hands to the engine.
//!
//! The wire format is the loose shape storage produces: dates and datetimes as
//! strings, event options as optional fields whose presence depends on
//! `eventType`. Parsing turns it into the typed model. Structural problems
//! with the event are errors; individual malformed time slots are dropped
//! with a warning so one bad submission cannot block a whole event.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::event::{
    EventConfig, EventLength, EventType, MeetingDuration, PreferredTime, TimingPreference,
};
use crate::offset::TimezoneOffset;
use crate::participant::{Participant, TimeSlot};
use crate::recommend::RecommendedWindow;

/// `duration` and `eventLength` may arrive as "2-hours" or as a bare number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrString {
    Number(u32),
    Text(String),
}

impl NumberOrString {
    fn into_text(self) -> String {
        match self {
            NumberOrString::Number(n) => n.to_string(),
            NumberOrString::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfigInput {
    pub id: String,
    pub event_type: String,
    pub availability_start_date: String,
    pub availability_end_date: String,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub duration: Option<NumberOrString>,
    #[serde(default)]
    pub event_length: Option<NumberOrString>,
    #[serde(default)]
    pub timing_preference: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotInput {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInput {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Accepted for compatibility; always re-derived from `time_slots`.
    #[serde(default)]
    pub has_responded: Option<bool>,
    #[serde(default)]
    pub time_slots: Vec<TimeSlotInput>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotInput {
    pub event: EventConfigInput,
    #[serde(default)]
    pub participants: Vec<ParticipantInput>,
    #[serde(default)]
    pub timezone_offset_minutes: i32,
}

/// A validated, typed snapshot ready for the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub event: EventConfig,
    pub participants: Vec<Participant>,
    pub timezone_offset: TimezoneOffset,
}

impl Snapshot {
    /// Parse and validate a snapshot JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        let input: SnapshotInput = serde_json::from_str(json)?;
        Self::try_from(input)
    }
}

impl TryFrom<SnapshotInput> for Snapshot {
    type Error = EngineError;

    fn try_from(input: SnapshotInput) -> Result<Self> {
        Ok(Self {
            event: EventConfig::try_from(input.event)?,
            participants: input.participants.into_iter().map(Participant::from).collect(),
            timezone_offset: TimezoneOffset::from_minutes(input.timezone_offset_minutes)?,
        })
    }
}

impl TryFrom<EventConfigInput> for EventConfig {
    type Error = EngineError;

    fn try_from(input: EventConfigInput) -> Result<Self> {
        let start = parse_date(&input.availability_start_date)?;
        let end = parse_date(&input.availability_end_date)?;

        match input.event_type.parse::<EventType>()? {
            EventType::SingleDay => {
                let preferred_time: PreferredTime =
                    required(input.preferred_time, "preferredTime")?.parse()?;
                let duration: MeetingDuration =
                    required(input.duration, "duration")?.into_text().parse()?;
                Ok(EventConfig::single_day(
                    input.id,
                    start,
                    end,
                    preferred_time,
                    duration,
                ))
            }
            EventType::MultiDay => {
                let event_length: EventLength =
                    required(input.event_length, "eventLength")?.into_text().parse()?;
                let timing_preference: TimingPreference =
                    required(input.timing_preference, "timingPreference")?.parse()?;
                Ok(EventConfig::multi_day(
                    input.id,
                    start,
                    end,
                    event_length,
                    timing_preference,
                ))
            }
        }
    }
}

impl From<ParticipantInput> for Participant {
    fn from(input: ParticipantInput) -> Self {
        let mut time_slots = Vec::with_capacity(input.time_slots.len());
        for raw in &input.time_slots {
            match parse_slot(raw) {
                Ok(slot) => time_slots.push(slot),
                Err(e) => {
                    tracing::warn!(participant_id = %input.id, error = %e, "dropping time slot");
                }
            }
        }
        Participant::new(input.id, input.name, time_slots)
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| EngineError::InvalidConfig(format!("missing {}", field)))
}

fn parse_slot(raw: &TimeSlotInput) -> Result<TimeSlot> {
    TimeSlot::new(parse_datetime(&raw.start_time)?, parse_datetime(&raw.end_time)?)
}

/// Parse an ISO 8601 datetime into `DateTime<Utc>`.
///
/// Accepts RFC 3339 (with offset or `Z`) and naive `YYYY-MM-DDTHH:MM[:SS]`,
/// which is interpreted as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map(|ndt| ndt.and_utc())
        .map_err(|e| EngineError::InvalidDatetime(format!("'{}': {}", s, e)))
}

/// Parse an ISO date, or take the UTC date of an RFC 3339 datetime.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|e| EngineError::InvalidDate(format!("'{}': {}", s, e)))
}

/// One recommendation as the API layer returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationOutput {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub participant_count: usize,
    pub total_participants: usize,
    pub percentage: u8,
    pub available_participant_ids: Vec<String>,
}

impl From<&RecommendedWindow> for RecommendationOutput {
    fn from(w: &RecommendedWindow) -> Self {
        Self {
            start_time: w.start_time,
            end_time: w.end_time,
            participant_count: w.available_count,
            total_participants: w.total_participants,
            percentage: w.score,
            available_participant_ids: w.available_participant_ids.iter().cloned().collect(),
        }
    }
}
