//! Availability aggregation: per-participant normalization and overlap indexes.
//!
//! Raw slots arrive as whatever each participant submitted: unordered, possibly
//! overlapping, possibly running past the event's range. [`normalize`] turns
//! them into sorted, non-overlapping intervals per participant, and
//! [`build_overlap_index`] buckets participants by time so callers can ask
//! "who is free during bucket B".
//!
//! Counting is always by participant id, never by slot: a participant with two
//! overlapping slots in the same bucket is counted once.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::offset::TimezoneOffset;
use crate::participant::{Participant, TimeSlot};
use crate::period::DayPeriod;
use crate::score::percentage;

/// A half-open `[start, end)` UTC interval.
pub type Interval = (DateTime<Utc>, DateTime<Utc>);

/// One participant's availability after merging and clipping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAvailability {
    pub participant_id: String,
    pub name: String,
    /// Sorted, non-overlapping, non-adjacent intervals.
    pub intervals: Vec<Interval>,
}

impl NormalizedAvailability {
    /// Whether a single merged interval contains all of `[start, end)`.
    pub fn covers(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        // Intervals are sorted and disjoint, so only the last one starting at
        // or before `start` can cover it.
        let idx = self.intervals.partition_point(|&(s, _)| s <= start);
        idx > 0 && self.intervals[idx - 1].1 >= end
    }

    /// Whether any interval overlaps `[start, end)`. Touching is not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let idx = self.intervals.partition_point(|&(_, e)| e <= start);
        self.intervals.get(idx).is_some_and(|&(s, _)| s < end)
    }
}

/// Merge overlapping or adjacent slots, optionally clipped to `window`.
///
/// Returns a sorted, non-overlapping list of intervals. Slots entirely outside
/// the window are discarded.
pub fn merge_slots(slots: &[TimeSlot], window: Option<Interval>) -> Vec<Interval> {
    let mut intervals: Vec<Interval> = slots
        .iter()
        .filter_map(|slot| match window {
            Some((ws, we)) if slot.overlaps(ws, we) => {
                Some((slot.start().max(ws), slot.end().min(we)))
            }
            Some(_) => None,
            None => Some((slot.start(), slot.end())),
        })
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_by_key(|&(start, end)| (start, end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.1 {
                last.1 = last.1.max(end);
                continue;
            }
        }
        merged.push((start, end));
    }

    merged
}

/// Normalize every participant's slots against the event window.
///
/// Output order matches `participants`. Non-responders get an empty interval
/// list rather than being dropped, so totals stay aligned with the invited set.
pub fn normalize(
    participants: &[Participant],
    window: Option<Interval>,
) -> Vec<NormalizedAvailability> {
    participants
        .iter()
        .map(|p| NormalizedAvailability {
            participant_id: p.id.clone(),
            name: p.name.clone(),
            intervals: merge_slots(&p.time_slots, window),
        })
        .collect()
}

/// How slots are grouped into buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    /// Each distinct submitted slot is its own bucket.
    #[default]
    Slot,
    /// (local date, morning/afternoon/evening) buckets.
    DayPeriod,
    /// Whole local days.
    Day,
}

impl FromStr for Granularity {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "slot" => Ok(Granularity::Slot),
            "day-period" => Ok(Granularity::DayPeriod),
            "day" => Ok(Granularity::Day),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown granularity '{}' (expected slot, day-period or day)",
                other
            ))),
        }
    }
}

/// Canonical bucket key: UTC start and end of the bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BucketKey {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Participants available during one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketAggregate {
    pub count: usize,
    pub participant_ids: BTreeSet<String>,
    /// Names in first-seen order, one per distinct participant.
    pub participant_names: Vec<String>,
}

impl BucketAggregate {
    fn add(&mut self, id: &str, name: &str) {
        if self.participant_ids.insert(id.to_string()) {
            self.participant_names.push(name.to_string());
            self.count = self.participant_ids.len();
        }
    }
}

/// A flattened, serializable row of an [`OverlapIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapEntry {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub count: usize,
    pub total_participants: usize,
    pub percentage: u8,
    pub participant_names: Vec<String>,
}

/// Mapping from bucket to the participants available in it.
///
/// Only buckets with at least one available participant are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlapIndex {
    buckets: BTreeMap<BucketKey, BucketAggregate>,
    total_participants: usize,
}

impl OverlapIndex {
    pub fn get(&self, key: &BucketKey) -> Option<&BucketAggregate> {
        self.buckets.get(key)
    }

    /// Available count for a bucket; 0 for absent buckets.
    pub fn count(&self, key: &BucketKey) -> usize {
        self.buckets.get(key).map_or(0, |b| b.count)
    }

    /// Share of the full invited set available in a bucket.
    pub fn percentage(&self, key: &BucketKey) -> u8 {
        percentage(self.count(key), self.total_participants)
    }

    pub fn total_participants(&self) -> usize {
        self.total_participants
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (&BucketKey, &BucketAggregate)> {
        self.buckets.iter()
    }

    /// The bucket with the most participants, earliest first on ties.
    pub fn busiest(&self) -> Option<(&BucketKey, &BucketAggregate)> {
        self.buckets
            .iter()
            .max_by(|a, b| a.1.count.cmp(&b.1.count).then(b.0.cmp(a.0)))
    }

    /// Flatten into serializable rows, chronologically.
    pub fn entries(&self) -> Vec<OverlapEntry> {
        self.buckets
            .iter()
            .map(|(key, agg)| OverlapEntry {
                start: key.start,
                end: key.end,
                count: agg.count,
                total_participants: self.total_participants,
                percentage: percentage(agg.count, self.total_participants),
                participant_names: agg.participant_names.clone(),
            })
            .collect()
    }

    fn add(&mut self, key: BucketKey, participant: &Participant) {
        self.buckets
            .entry(key)
            .or_default()
            .add(&participant.id, &participant.name);
    }
}

/// Bucket every participant's slots at the requested granularity.
///
/// Day and period boundaries are evaluated in local time via `offset`; keys
/// are the corresponding UTC instants. Participants without slots appear in
/// no bucket but still count toward `total_participants`.
pub fn build_overlap_index(
    participants: &[Participant],
    granularity: Granularity,
    offset: TimezoneOffset,
) -> OverlapIndex {
    let mut index = OverlapIndex {
        buckets: BTreeMap::new(),
        total_participants: participants.len(),
    };

    for participant in participants {
        for slot in &participant.time_slots {
            match granularity {
                Granularity::Slot => index.add(
                    BucketKey {
                        start: slot.start(),
                        end: slot.end(),
                    },
                    participant,
                ),
                Granularity::DayPeriod | Granularity::Day => {
                    for key in touched_buckets(slot, granularity, offset) {
                        index.add(key, participant);
                    }
                }
            }
        }
    }

    tracing::debug!(
        buckets = index.len(),
        participants = index.total_participants,
        ?granularity,
        "built overlap index"
    );

    index
}

/// Day or day-period buckets that `slot` overlaps.
fn touched_buckets(
    slot: &TimeSlot,
    granularity: Granularity,
    offset: TimezoneOffset,
) -> Vec<BucketKey> {
    let mut keys = Vec::new();
    let mut date = offset.local_date(slot.start());

    loop {
        let (day_start, day_end) = offset.local_day_bounds(date);
        if day_start >= slot.end() {
            break;
        }
        match granularity {
            Granularity::Day => {
                if slot.overlaps(day_start, day_end) {
                    keys.push(BucketKey {
                        start: day_start,
                        end: day_end,
                    });
                }
            }
            _ => {
                for period in DayPeriod::ALL {
                    let (from, to) = period.hour_bounds();
                    let start = offset.at_local_hour(date, from);
                    let end = offset.at_local_hour(date, to);
                    if slot.overlaps(start, end) {
                        keys.push(BucketKey { start, end });
                    }
                }
            }
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    keys
}
