//! Periods of the local day used for heatmap buckets and time-of-day preferences.

use serde::{Deserialize, Serialize};

/// One of the three wall-clock periods a day is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayPeriod {
    /// 06:00–12:00 local.
    Morning,
    /// 12:00–18:00 local.
    Afternoon,
    /// 18:00–24:00 local.
    Evening,
}

impl DayPeriod {
    /// All periods in chronological order.
    pub const ALL: [DayPeriod; 3] = [DayPeriod::Morning, DayPeriod::Afternoon, DayPeriod::Evening];

    /// Local hour bounds `[start, end)`. `end` may be 24.
    pub fn hour_bounds(self) -> (u32, u32) {
        match self {
            DayPeriod::Morning => (6, 12),
            DayPeriod::Afternoon => (12, 18),
            DayPeriod::Evening => (18, 24),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
        }
    }
}
