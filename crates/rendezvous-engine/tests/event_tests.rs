//! Tests for event configuration parsing and date-range helpers.

use chrono::{NaiveDate, TimeZone, Utc};
use rendezvous_engine::{
    EventConfig, EventLength, EventType, MeetingDuration, PreferredTime, TimezoneOffset,
    TimingPreference,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Durations ───────────────────────────────────────────────────────────────

#[test]
fn named_durations_map_to_minutes() {
    let cases = [
        ("1-hour", 60),
        ("2-hours", 120),
        ("half-day", 240),
        ("full-day", 480),
        ("30-minutes", 30),
        ("3-hours", 180),
        ("90", 90),
        (" 2-Hours ", 120),
    ];
    for (input, minutes) in cases {
        let parsed: MeetingDuration = input.parse().unwrap();
        assert_eq!(parsed.minutes(), minutes, "parsing {:?}", input);
    }
}

#[test]
fn invalid_durations_are_rejected() {
    for input in ["", "0-hours", "fortnight", "2-days", "25-hours", "-1-hour"] {
        assert!(
            input.parse::<MeetingDuration>().is_err(),
            "{:?} should not parse",
            input
        );
    }
}

// ── Event lengths ───────────────────────────────────────────────────────────

#[test]
fn event_lengths_map_to_days() {
    let cases = [("3-days", 3), ("1-day", 1), ("1-week", 7), ("2-weeks", 14), ("5", 5)];
    for (input, days) in cases {
        let parsed: EventLength = input.parse().unwrap();
        assert_eq!(parsed.days(), days, "parsing {:?}", input);
    }
}

#[test]
fn zero_and_unknown_lengths_are_rejected() {
    assert!("0-days".parse::<EventLength>().is_err());
    assert!("3-months".parse::<EventLength>().is_err());
    assert!("many".parse::<EventLength>().is_err());
}

// ── Enumerations ────────────────────────────────────────────────────────────

#[test]
fn preferred_time_bounds() {
    assert_eq!(PreferredTime::Morning.hour_bounds(), (6, 12));
    assert_eq!(PreferredTime::Afternoon.hour_bounds(), (12, 18));
    assert_eq!(PreferredTime::Evening.hour_bounds(), (18, 24));
    assert_eq!(PreferredTime::Anytime.hour_bounds(), (0, 24));
    assert_eq!("evening".parse::<PreferredTime>().unwrap(), PreferredTime::Evening);
    assert!("night".parse::<PreferredTime>().is_err());
}

#[test]
fn timing_preferences_filter_days() {
    let saturday = date(2024, 1, 6);
    let monday = date(2024, 1, 8);

    assert!(TimingPreference::WeekendsOnly.allows(saturday));
    assert!(!TimingPreference::WeekendsOnly.allows(monday));
    assert!(TimingPreference::WeekdaysOnly.allows(monday));
    assert!(!TimingPreference::WeekdaysOnly.allows(saturday));
    assert!(TimingPreference::Consecutive.allows(saturday));
    assert!(TimingPreference::Anytime.allows(monday));

    assert_eq!(
        "weekdays-only".parse::<TimingPreference>().unwrap(),
        TimingPreference::WeekdaysOnly
    );
    assert!("weekly".parse::<TimingPreference>().is_err());
}

#[test]
fn event_type_parses_wire_names() {
    assert_eq!("single-day".parse::<EventType>().unwrap(), EventType::SingleDay);
    assert_eq!("multi-day".parse::<EventType>().unwrap(), EventType::MultiDay);
    assert!("recurring".parse::<EventType>().is_err());
}

// ── Date range helpers ──────────────────────────────────────────────────────

#[test]
fn dates_are_inclusive_and_empty_when_inverted() {
    let event = EventConfig::multi_day(
        "evt",
        date(2024, 2, 27),
        date(2024, 3, 1),
        EventLength::from_days(1).unwrap(),
        TimingPreference::Anytime,
    );
    assert_eq!(event.event_type(), EventType::MultiDay);
    assert_eq!(event.day_count(), 4);
    let dates: Vec<NaiveDate> = event.dates().collect();
    assert_eq!(dates.first(), Some(&date(2024, 2, 27)));
    assert_eq!(dates.last(), Some(&date(2024, 3, 1)));

    let inverted = EventConfig::single_day(
        "evt",
        date(2024, 3, 1),
        date(2024, 2, 27),
        PreferredTime::Anytime,
        MeetingDuration::from_minutes(60).unwrap(),
    );
    assert_eq!(inverted.day_count(), 0);
    assert_eq!(inverted.dates().count(), 0);
    assert!(inverted.window(TimezoneOffset::UTC).is_none());
}

#[test]
fn window_spans_local_midnights() {
    let event = EventConfig::single_day(
        "evt",
        date(2024, 1, 15),
        date(2024, 1, 16),
        PreferredTime::Morning,
        MeetingDuration::from_minutes(60).unwrap(),
    );
    let offset = TimezoneOffset::from_minutes(-480).unwrap();

    let (start, end) = event.window(offset).unwrap();

    assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2024, 1, 17, 8, 0, 0).unwrap());
}

#[test]
fn event_config_serializes_with_wire_names() {
    let event = EventConfig::single_day(
        "evt-1",
        date(2024, 1, 15),
        date(2024, 1, 20),
        PreferredTime::Morning,
        MeetingDuration::from_minutes(120).unwrap(),
    );

    let value = serde_json::to_value(&event).unwrap();

    assert_eq!(value["id"], "evt-1");
    assert_eq!(value["eventType"], "single-day");
    assert_eq!(value["availabilityStartDate"], "2024-01-15");
    assert_eq!(value["preferredTime"], "morning");
    assert_eq!(value["duration"], 120);

    let back: EventConfig = serde_json::from_value(value).unwrap();
    assert_eq!(back, event);
}
