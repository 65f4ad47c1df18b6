//! Tests for candidate scoring and ranking.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rendezvous_engine::{
    recommend, recommend_with_options, EventConfig, EventLength, MeetingDuration, Participant,
    PreferredTime, RecommendOptions, TimeSlot, TimezoneOffset, TimingPreference,
    DEFAULT_RECOMMENDATION_LIMIT,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}

fn participant(id: &str, slots: Vec<TimeSlot>) -> Participant {
    Participant::new(id, id.to_uppercase(), slots)
}

fn single_day(
    start: NaiveDate,
    end: NaiveDate,
    preferred: PreferredTime,
    duration: &str,
) -> EventConfig {
    EventConfig::single_day("evt", start, end, preferred, duration.parse().unwrap())
}

fn multi_day(
    start: NaiveDate,
    end: NaiveDate,
    length: &str,
    preference: TimingPreference,
) -> EventConfig {
    EventConfig::multi_day("evt", start, end, length.parse().unwrap(), preference)
}

// ── Scenario A: single-day morning meeting ──────────────────────────────────

#[test]
fn single_day_morning_top_candidate_has_both_responders() {
    let event = single_day(
        date(2024, 1, 15),
        date(2024, 1, 20),
        PreferredTime::Morning,
        "2-hours",
    );
    let participants = vec![
        participant("p1", vec![slot("2024-01-16T09:00:00Z", "2024-01-16T12:00:00Z")]),
        participant("p2", vec![slot("2024-01-16T09:30:00Z", "2024-01-16T12:30:00Z")]),
        participant("p3", vec![]),
    ];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    assert!(!result.is_empty());
    let top = &result[0];
    assert_eq!(top.start_time.date_naive(), date(2024, 1, 16));
    assert!(top.start_time >= at(2024, 1, 16, 9, 0));
    assert!(top.end_time <= at(2024, 1, 16, 12, 0));
    assert_eq!(top.end_time - top.start_time, chrono::Duration::minutes(120));
    assert_eq!(top.available_count, 2);
    assert_eq!(top.total_participants, 3);
    assert_eq!(top.score, 67);
    assert!(top.available_participant_ids.contains("p1"));
    assert!(top.available_participant_ids.contains("p2"));
}

#[test]
fn single_day_slot_start_candidates_precede_grid_on_ties() {
    let event = single_day(
        date(2024, 1, 15),
        date(2024, 1, 20),
        PreferredTime::Morning,
        "2-hours",
    );
    let participants = vec![
        participant("p1", vec![slot("2024-01-16T09:00:00Z", "2024-01-16T12:00:00Z")]),
        participant("p2", vec![slot("2024-01-16T09:30:00Z", "2024-01-16T12:30:00Z")]),
        participant("p3", vec![]),
    ];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    // 09:30 (from P2's slot start) and 10:00 (grid) both fit both responders.
    assert_eq!(result[0].start_time, at(2024, 1, 16, 9, 30));
    assert_eq!(result[1].start_time, at(2024, 1, 16, 10, 0));
    assert_eq!(result[1].available_count, 2);
    // 09:00 only fits P1.
    assert_eq!(result[2].start_time, at(2024, 1, 16, 9, 0));
    assert_eq!(result[2].available_count, 1);
    assert_eq!(result[2].score, 33);
}

// ── Scenario B: multi-day weekends-only with no long weekend ────────────────

#[test]
fn weekends_only_three_days_in_january_2024_is_empty() {
    let event = multi_day(
        date(2024, 1, 1),
        date(2024, 1, 31),
        "3-days",
        TimingPreference::WeekendsOnly,
    );
    let participants = vec![participant(
        "p1",
        vec![slot("2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z")],
    )];

    assert!(recommend(&event, &participants, TimezoneOffset::UTC).is_empty());
}

#[test]
fn weekends_only_two_days_yields_each_weekend() {
    let event = multi_day(
        date(2024, 1, 1),
        date(2024, 1, 31),
        "2-days",
        TimingPreference::WeekendsOnly,
    );

    let result = recommend(&event, &[], TimezoneOffset::UTC);

    let starts: Vec<NaiveDate> = result.iter().map(|w| w.start_time.date_naive()).collect();
    assert_eq!(
        starts,
        vec![
            date(2024, 1, 6),
            date(2024, 1, 13),
            date(2024, 1, 20),
            date(2024, 1, 27)
        ]
    );
}

// ── Scenario C: nobody responded ────────────────────────────────────────────

#[test]
fn no_responses_still_yield_zero_scored_candidates() {
    let event = single_day(
        date(2024, 1, 15),
        date(2024, 1, 16),
        PreferredTime::Anytime,
        "1-hour",
    );
    let participants = vec![participant("p1", vec![]), participant("p2", vec![])];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    assert_eq!(result.len(), DEFAULT_RECOMMENDATION_LIMIT);
    for window in &result {
        assert_eq!(window.available_count, 0);
        assert_eq!(window.score, 0);
        assert_eq!(window.total_participants, 2);
    }
    // Ties resolve to the earliest start.
    assert_eq!(result[0].start_time, at(2024, 1, 15, 0, 0));
    assert_eq!(result[1].start_time, at(2024, 1, 15, 1, 0));
}

#[test]
fn zero_participants_score_zero_without_panicking() {
    let event = multi_day(
        date(2024, 1, 1),
        date(2024, 1, 10),
        "3-days",
        TimingPreference::Anytime,
    );

    let result = recommend(&event, &[], TimezoneOffset::UTC);

    assert!(!result.is_empty());
    assert!(result.iter().all(|w| w.score == 0 && w.total_participants == 0));
}

// ── Empty results ───────────────────────────────────────────────────────────

#[test]
fn inverted_range_returns_empty() {
    let single = single_day(
        date(2024, 1, 20),
        date(2024, 1, 15),
        PreferredTime::Anytime,
        "1-hour",
    );
    let multi = multi_day(
        date(2024, 1, 20),
        date(2024, 1, 15),
        "1-day",
        TimingPreference::Anytime,
    );
    let participants = vec![participant(
        "p1",
        vec![slot("2024-01-16T09:00:00Z", "2024-01-16T12:00:00Z")],
    )];

    assert!(recommend(&single, &participants, TimezoneOffset::UTC).is_empty());
    assert!(recommend(&multi, &participants, TimezoneOffset::UTC).is_empty());
}

#[test]
fn event_longer_than_range_returns_empty() {
    let event = multi_day(
        date(2024, 1, 1),
        date(2024, 1, 5),
        "1-week",
        TimingPreference::Anytime,
    );
    assert!(recommend(&event, &[], TimezoneOffset::UTC).is_empty());
}

#[test]
fn duration_longer_than_period_returns_empty() {
    // A full day (8h) cannot fit in the 6h morning period.
    let event = single_day(
        date(2024, 1, 15),
        date(2024, 1, 16),
        PreferredTime::Morning,
        "full-day",
    );
    assert!(recommend(&event, &[], TimezoneOffset::UTC).is_empty());
}

#[test]
fn single_date_range_is_valid() {
    let event = single_day(
        date(2024, 1, 15),
        date(2024, 1, 15),
        PreferredTime::Evening,
        "half-day",
    );

    let result = recommend(&event, &[], TimezoneOffset::UTC);

    // Evening is 18:00-24:00, so only an 18:00 start fits four hours.
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].start_time, at(2024, 1, 15, 18, 0));
    assert_eq!(result[0].end_time, at(2024, 1, 15, 22, 0));
}

// ── Single-day coverage rules ───────────────────────────────────────────────

#[test]
fn partial_overlap_does_not_count_for_single_day() {
    let event = single_day(
        date(2024, 1, 16),
        date(2024, 1, 16),
        PreferredTime::Anytime,
        "2-hours",
    );
    let participants = vec![participant(
        "p1",
        vec![slot("2024-01-16T09:00:00Z", "2024-01-16T10:00:00Z")],
    )];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    assert!(result.iter().all(|w| w.available_count == 0));
}

#[test]
fn back_to_back_slots_jointly_cover_a_meeting() {
    let event = single_day(
        date(2024, 1, 16),
        date(2024, 1, 16),
        PreferredTime::Anytime,
        "2-hours",
    );
    let participants = vec![participant(
        "p1",
        vec![
            slot("2024-01-16T10:00:00Z", "2024-01-16T11:00:00Z"),
            slot("2024-01-16T09:00:00Z", "2024-01-16T10:00:00Z"),
        ],
    )];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    assert_eq!(result[0].start_time, at(2024, 1, 16, 9, 0));
    assert_eq!(result[0].available_count, 1);
    assert_eq!(result[0].score, 100);
}

#[test]
fn overlapping_slots_from_one_participant_count_once() {
    let event = single_day(
        date(2024, 1, 16),
        date(2024, 1, 16),
        PreferredTime::Morning,
        "1-hour",
    );
    let participants = vec![
        participant(
            "p1",
            vec![
                slot("2024-01-16T08:00:00Z", "2024-01-16T11:00:00Z"),
                slot("2024-01-16T09:00:00Z", "2024-01-16T10:00:00Z"),
            ],
        ),
        participant("p2", vec![]),
    ];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    assert_eq!(result[0].available_count, 1);
    assert_eq!(result[0].score, 50);
}

#[test]
fn timezone_offset_moves_period_bounds() {
    // 14:00-16:00Z is 09:00-11:00 at UTC-5, inside the local morning.
    let event = single_day(
        date(2024, 1, 16),
        date(2024, 1, 16),
        PreferredTime::Morning,
        "1-hour",
    );
    let participants = vec![participant(
        "p1",
        vec![slot("2024-01-16T14:00:00Z", "2024-01-16T16:00:00Z")],
    )];

    let local = recommend(
        &event,
        &participants,
        TimezoneOffset::from_minutes(-300).unwrap(),
    );
    assert_eq!(local[0].start_time, at(2024, 1, 16, 14, 0));
    assert_eq!(local[0].available_count, 1);

    // In UTC the same slot is in the afternoon, so no morning window fits it.
    let utc = recommend(&event, &participants, TimezoneOffset::UTC);
    assert!(utc.iter().all(|w| w.available_count == 0));
    assert_eq!(utc[0].start_time, at(2024, 1, 16, 6, 0));
}

#[test]
fn slots_outside_the_range_are_ignored() {
    let event = single_day(
        date(2024, 1, 16),
        date(2024, 1, 16),
        PreferredTime::Anytime,
        "1-hour",
    );
    let participants = vec![participant(
        "p1",
        vec![slot("2024-01-17T09:00:00Z", "2024-01-17T12:00:00Z")],
    )];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    assert!(result
        .iter()
        .all(|w| w.start_time.date_naive() == date(2024, 1, 16)));
    assert!(result.iter().all(|w| w.available_count == 0));
}

// ── Multi-day coverage rules ────────────────────────────────────────────────

#[test]
fn multi_day_requires_every_day_covered() {
    let event = multi_day(
        date(2024, 1, 1),
        date(2024, 1, 7),
        "2-days",
        TimingPreference::Consecutive,
    );
    let participants = vec![
        participant(
            "p1",
            vec![
                slot("2024-01-03T10:00:00Z", "2024-01-03T12:00:00Z"),
                slot("2024-01-04T14:00:00Z", "2024-01-04T16:00:00Z"),
            ],
        ),
        // One long slot covering Jan 2, 3 and 4; it ends exactly at Jan 5 00:00.
        participant(
            "p2",
            vec![slot("2024-01-02T00:00:00Z", "2024-01-05T00:00:00Z")],
        ),
    ];

    let result = recommend(&event, &participants, TimezoneOffset::UTC);

    assert_eq!(result.len(), 5);
    assert_eq!(result[0].start_time, at(2024, 1, 3, 0, 0));
    assert_eq!(result[0].end_time, at(2024, 1, 5, 0, 0));
    assert_eq!(result[0].available_count, 2);
    assert_eq!(result[0].score, 100);

    assert_eq!(result[1].start_time, at(2024, 1, 2, 0, 0));
    assert_eq!(result[1].available_count, 1);
    assert!(result[1].available_participant_ids.contains("p2"));

    // Jan 4-5: p1 has nothing on the 5th, p2's slot only touches its start.
    let jan4 = result
        .iter()
        .find(|w| w.start_time == at(2024, 1, 4, 0, 0))
        .expect("Jan 4 window should be in the top five");
    assert_eq!(jan4.available_count, 0);
}

#[test]
fn weekdays_only_excludes_windows_touching_weekends() {
    let event = multi_day(
        date(2024, 1, 1),
        date(2024, 1, 14),
        "5-days",
        TimingPreference::WeekdaysOnly,
    );

    let result = recommend(&event, &[], TimezoneOffset::UTC);

    let starts: Vec<NaiveDate> = result.iter().map(|w| w.start_time.date_naive()).collect();
    assert_eq!(starts, vec![date(2024, 1, 1), date(2024, 1, 8)]);
}

#[test]
fn multi_day_window_bounds_follow_local_midnight() {
    let event = multi_day(
        date(2024, 1, 1),
        date(2024, 1, 1),
        "1-day",
        TimingPreference::Anytime,
    );

    let result = recommend(&event, &[], TimezoneOffset::from_minutes(60).unwrap());

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].start_time, at(2023, 12, 31, 23, 0));
    assert_eq!(result[0].end_time, at(2024, 1, 1, 23, 0));
}

// ── Options ─────────────────────────────────────────────────────────────────

#[test]
fn limit_caps_the_result_and_zero_means_default() {
    let event = single_day(
        date(2024, 1, 15),
        date(2024, 1, 20),
        PreferredTime::Anytime,
        "1-hour",
    );

    let two = recommend_with_options(
        &event,
        &[],
        &RecommendOptions {
            limit: 2,
            ..RecommendOptions::default()
        },
    );
    assert_eq!(two.len(), 2);

    let zero = recommend_with_options(
        &event,
        &[],
        &RecommendOptions {
            limit: 0,
            ..RecommendOptions::default()
        },
    );
    assert_eq!(zero.len(), DEFAULT_RECOMMENDATION_LIMIT);
}

#[test]
fn repeated_runs_are_identical() {
    let event = single_day(
        date(2024, 1, 15),
        date(2024, 1, 20),
        PreferredTime::Afternoon,
        "1-hour",
    );
    let participants = vec![
        participant("p1", vec![slot("2024-01-17T12:00:00Z", "2024-01-17T15:00:00Z")]),
        participant("p2", vec![slot("2024-01-17T13:30:00Z", "2024-01-17T17:00:00Z")]),
        participant("p3", vec![slot("2024-01-18T12:00:00Z", "2024-01-18T18:00:00Z")]),
    ];

    let first = recommend(&event, &participants, TimezoneOffset::UTC);
    let second = recommend(&event, &participants, TimezoneOffset::UTC);
    assert_eq!(first, second);
}

#[test]
fn meeting_duration_and_length_accessors() {
    assert_eq!(MeetingDuration::from_minutes(45).unwrap().minutes(), 45);
    assert_eq!(EventLength::from_days(3).unwrap().days(), 3);
}
