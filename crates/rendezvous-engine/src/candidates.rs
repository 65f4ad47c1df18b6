//! Candidate window generation for single-day and multi-day events.
//!
//! Candidates come from the event configuration alone (plus participant slot
//! starts for single-day events), so a range nobody has responded to still
//! produces candidates.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::event::{
    EventConfig, EventKind, EventLength, MeetingDuration, PreferredTime, TimingPreference,
};
use crate::offset::TimezoneOffset;
use crate::participant::Participant;

/// A generated `[start, end)` window under evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CandidateWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl CandidateWindow {
    /// Consecutive 24-hour local days making up the window.
    ///
    /// Fixed offsets have no DST, so every local day is exactly 24 hours.
    pub fn days(&self) -> impl Iterator<Item = (DateTime<Utc>, DateTime<Utc>)> + '_ {
        let count = (self.end - self.start).num_days().max(1);
        (0..count).map(move |k| {
            let day_start = self.start + Duration::days(k);
            (day_start, (day_start + Duration::days(1)).min(self.end))
        })
    }
}

/// Generate every candidate window for `event`, in chronological order.
pub fn generate_candidates(
    event: &EventConfig,
    participants: &[Participant],
    offset: TimezoneOffset,
) -> Vec<CandidateWindow> {
    match event.kind {
        EventKind::SingleDay {
            preferred_time,
            duration,
        } => single_day_candidates(event, participants, preferred_time, duration, offset),
        EventKind::MultiDay {
            event_length,
            timing_preference,
        } => multi_day_candidates(event, event_length, timing_preference, offset),
    }
}

/// Scan each date's allowed hours for `duration`-long windows.
///
/// Starts come from a grid stepping by `duration` from the start of the
/// allowed hours, plus every participant slot start inside them. A start is
/// kept only if the whole window fits before the hours end.
fn single_day_candidates(
    event: &EventConfig,
    participants: &[Participant],
    preferred_time: PreferredTime,
    duration: MeetingDuration,
    offset: TimezoneOffset,
) -> Vec<CandidateWindow> {
    let length = duration.as_chrono();
    let (from_hour, to_hour) = preferred_time.hour_bounds();

    let slot_starts: BTreeSet<DateTime<Utc>> = participants
        .iter()
        .flat_map(|p| p.time_slots.iter().map(|s| s.start()))
        .collect();

    let mut candidates = Vec::new();
    for date in event.dates() {
        let bound_start = offset.at_local_hour(date, from_hour);
        let bound_end = offset.at_local_hour(date, to_hour);
        let last_start = bound_end - length;
        if last_start < bound_start {
            continue;
        }

        let mut starts: BTreeSet<DateTime<Utc>> = BTreeSet::new();
        let mut cursor = bound_start;
        while cursor <= last_start {
            starts.insert(cursor);
            cursor = cursor + length;
        }
        starts.extend(slot_starts.range(bound_start..=last_start).copied());

        candidates.extend(starts.into_iter().map(|start| CandidateWindow {
            start,
            end: start + length,
        }));
    }

    candidates
}

/// One window per start date whose `event_length` days all fit in range and
/// satisfy the timing preference.
fn multi_day_candidates(
    event: &EventConfig,
    event_length: EventLength,
    timing_preference: TimingPreference,
    offset: TimezoneOffset,
) -> Vec<CandidateWindow> {
    let days = event_length.days();
    if days > event.day_count() {
        return Vec::new();
    }

    event
        .dates()
        .take((event.day_count() - days + 1) as usize)
        .filter(|&start| window_dates(start, days).all(|d| timing_preference.allows(d)))
        .map(|start| CandidateWindow {
            start: offset.at_local_hour(start, 0),
            end: offset.at_local_hour(start + Duration::days(days as i64 - 1), 24),
        })
        .collect()
}

fn window_dates(start: NaiveDate, days: u32) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(days as usize)
}
