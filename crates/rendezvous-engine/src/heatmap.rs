//! Heatmap cells for visualizing group availability across an event's range.
//!
//! Single-day events get one cell per (date, period); multi-day events get one
//! cell per date. Unlike an [`OverlapIndex`](crate::aggregate::OverlapIndex),
//! the heatmap is dense: every date in range has its cells, including those
//! nobody is available for.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{build_overlap_index, BucketKey, Granularity};
use crate::event::{EventConfig, EventKind};
use crate::offset::TimezoneOffset;
use crate::participant::Participant;
use crate::period::DayPeriod;
use crate::score::percentage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    /// Local date of the cell.
    pub date: NaiveDate,
    /// Period of day; `None` for whole-day cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<DayPeriod>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available_count: usize,
    pub total_participants: usize,
    pub percentage: u8,
    pub participant_names: Vec<String>,
}

/// Build the dense heatmap for `event`, in chronological order.
///
/// Returns an empty list when the availability range is inverted.
pub fn build_heatmap(
    event: &EventConfig,
    participants: &[Participant],
    offset: TimezoneOffset,
) -> Vec<HeatmapCell> {
    let granularity = match event.kind {
        EventKind::SingleDay { .. } => Granularity::DayPeriod,
        EventKind::MultiDay { .. } => Granularity::Day,
    };
    let index = build_overlap_index(participants, granularity, offset);
    let total = index.total_participants();

    let cell = |date: NaiveDate, period: Option<DayPeriod>, key: BucketKey| {
        let (available_count, participant_names) = index
            .get(&key)
            .map(|agg| (agg.count, agg.participant_names.clone()))
            .unwrap_or_default();
        HeatmapCell {
            date,
            period,
            start: key.start,
            end: key.end,
            available_count,
            total_participants: total,
            percentage: percentage(available_count, total),
            participant_names,
        }
    };

    let mut cells = Vec::new();
    for date in event.dates() {
        match granularity {
            Granularity::DayPeriod => {
                for period in DayPeriod::ALL {
                    let (from, to) = period.hour_bounds();
                    let key = BucketKey {
                        start: offset.at_local_hour(date, from),
                        end: offset.at_local_hour(date, to),
                    };
                    cells.push(cell(date, Some(period), key));
                }
            }
            _ => {
                let (start, end) = offset.local_day_bounds(date);
                cells.push(cell(date, None, BucketKey { start, end }));
            }
        }
    }

    cells
}
