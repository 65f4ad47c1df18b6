//! # rendezvous-engine
//!
//! Deterministic group availability aggregation and meeting-time recommendation.
//!
//! Participants submit availability slots for an event; the engine aggregates
//! them into overlap buckets and heatmaps, then searches the event's date
//! range for the windows the most invitees can attend. Everything here is a
//! pure function of its inputs: no I/O, no clock access, no global state. The
//! caller supplies a consistent snapshot and a fixed viewer timezone offset.
//!
//! ## Modules
//!
//! - [`event`] — Event configuration (single-day vs multi-day constraints)
//! - [`participant`] — Participants, time slots, response summaries
//! - [`offset`] — Fixed viewer offsets for wall-clock bucketing
//! - [`period`] — Morning / afternoon / evening periods of the day
//! - [`aggregate`] — Slot normalization and overlap indexes
//! - [`heatmap`] — Dense per-day / per-period availability cells
//! - [`candidates`] — Candidate window generation
//! - [`recommend`] — Scoring and ranking of candidate windows
//! - [`snapshot`] — JSON snapshot parsing and output DTOs
//! - [`error`] — Error types

pub mod aggregate;
pub mod candidates;
pub mod error;
pub mod event;
pub mod heatmap;
pub mod offset;
pub mod participant;
pub mod period;
pub mod recommend;
pub mod score;
pub mod snapshot;

pub use aggregate::{
    build_overlap_index, merge_slots, normalize, BucketAggregate, BucketKey, Granularity,
    NormalizedAvailability, OverlapEntry, OverlapIndex,
};
pub use candidates::{generate_candidates, CandidateWindow};
pub use error::EngineError;
pub use event::{
    EventConfig, EventKind, EventLength, EventType, MeetingDuration, PreferredTime,
    TimingPreference,
};
pub use heatmap::{build_heatmap, HeatmapCell};
pub use offset::TimezoneOffset;
pub use participant::{summarize_responses, Participant, ResponseSummary, TimeSlot};
pub use period::DayPeriod;
pub use recommend::{
    recommend, recommend_with_options, RecommendOptions, RecommendedWindow,
    DEFAULT_RECOMMENDATION_LIMIT,
};
pub use score::percentage;
pub use snapshot::{RecommendationOutput, Snapshot};
