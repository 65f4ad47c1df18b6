//! Rank candidate windows by how many invitees can attend.
//!
//! The pipeline is: normalize slots against the event window, generate
//! candidates, score each candidate, sort, truncate. Every call is pure; the
//! same inputs always produce the same ordered output.
//!
//! Availability rules differ by event type:
//!
//! - **Single-day**: a participant counts only if their availability covers
//!   the *entire* candidate. Overlapping or back-to-back slots are merged
//!   first, so two adjacent submissions can jointly cover a meeting.
//! - **Multi-day**: a participant counts only if *every* local day of the
//!   window has at least one of their slots overlapping it.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{normalize, NormalizedAvailability};
use crate::candidates::{generate_candidates, CandidateWindow};
use crate::event::{EventConfig, EventKind};
use crate::offset::TimezoneOffset;
use crate::participant::Participant;
use crate::score::percentage;

/// Recommendations returned when the caller does not ask for a specific limit.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Per-request knobs for [`recommend_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    /// Viewer offset used for day and period boundaries.
    pub timezone_offset: TimezoneOffset,
    /// Maximum windows returned. 0 means [`DEFAULT_RECOMMENDATION_LIMIT`].
    pub limit: usize,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        Self {
            timezone_offset: TimezoneOffset::UTC,
            limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

/// A scored candidate window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedWindow {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub available_participant_ids: BTreeSet<String>,
    pub available_count: usize,
    pub total_participants: usize,
    /// Rounded percentage of invitees available, 0–100.
    pub score: u8,
}

/// Recommend the best windows for `event` using the default limit.
pub fn recommend(
    event: &EventConfig,
    participants: &[Participant],
    offset: TimezoneOffset,
) -> Vec<RecommendedWindow> {
    recommend_with_options(
        event,
        participants,
        &RecommendOptions {
            timezone_offset: offset,
            ..RecommendOptions::default()
        },
    )
}

/// Recommend the best windows for `event`, best first.
///
/// Returns an empty list when the availability range is inverted or no
/// window fits the constraints. Otherwise at least one window is returned,
/// even if nobody can attend it.
pub fn recommend_with_options(
    event: &EventConfig,
    participants: &[Participant],
    options: &RecommendOptions,
) -> Vec<RecommendedWindow> {
    let offset = options.timezone_offset;
    let limit = if options.limit == 0 {
        DEFAULT_RECOMMENDATION_LIMIT
    } else {
        options.limit
    };

    let Some(window) = event.window(offset) else {
        tracing::debug!(event_id = %event.id, "availability range is inverted");
        return Vec::new();
    };

    let availability = normalize(participants, Some(window));
    let candidates = generate_candidates(event, participants, offset);
    let mut ranked = score_candidates(event, &availability, &candidates);
    rank(&mut ranked);
    ranked.truncate(limit);

    tracing::debug!(
        event_id = %event.id,
        candidates = candidates.len(),
        returned = ranked.len(),
        top_count = ranked.first().map_or(0, |w| w.available_count),
        "scored candidate windows"
    );

    ranked
}

/// Score every candidate against normalized participant availability.
///
/// `availability` must contain one entry per invited participant, responders
/// or not; its length is the score denominator.
pub fn score_candidates(
    event: &EventConfig,
    availability: &[NormalizedAvailability],
    candidates: &[CandidateWindow],
) -> Vec<RecommendedWindow> {
    let total = availability.len();
    candidates
        .iter()
        .map(|candidate| {
            let available_participant_ids: BTreeSet<String> = availability
                .iter()
                .filter(|a| is_available(event, a, candidate))
                .map(|a| a.participant_id.clone())
                .collect();
            let available_count = available_participant_ids.len();
            RecommendedWindow {
                start_time: candidate.start,
                end_time: candidate.end,
                available_participant_ids,
                available_count,
                total_participants: total,
                score: percentage(available_count, total),
            }
        })
        .collect()
}

/// Sort by available count descending, then earliest start.
pub fn rank(windows: &mut [RecommendedWindow]) {
    windows.sort_by(|a, b| {
        b.available_count
            .cmp(&a.available_count)
            .then(a.start_time.cmp(&b.start_time))
            .then(a.end_time.cmp(&b.end_time))
    });
}

fn is_available(
    event: &EventConfig,
    availability: &NormalizedAvailability,
    candidate: &CandidateWindow,
) -> bool {
    match event.kind {
        EventKind::SingleDay { .. } => availability.covers(candidate.start, candidate.end),
        EventKind::MultiDay { .. } => candidate
            .days()
            .all(|(day_start, day_end)| availability.overlaps(day_start, day_end)),
    }
}
