use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use super::{extract_daylight_windows, DaylightError};
use crate::db::Document;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
}

fn t0() -> f64 {
    base_time().timestamp() as f64
}

fn sample(visibility: &str, timestamp: f64) -> Document {
    json!({"visibility": visibility, "timestamp": timestamp})
        .as_object()
        .cloned()
        .unwrap()
}

fn at(offset_secs: i64) -> DateTime<Utc> {
    base_time() + chrono::Duration::seconds(offset_secs)
}

#[test]
fn test_alternating_samples_yield_two_windows() {
    let samples = vec![
        sample("daylight", t0()),
        sample("eclipsed", t0() + 30.0),
        sample("daylight", t0() + 60.0),
        sample("eclipsed", t0() + 90.0),
    ];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start, at(0));
    assert_eq!(windows[0].end, at(30));
    assert_eq!(windows[1].start, at(60));
    assert_eq!(windows[1].end, at(90));
}

#[test]
fn test_window_spans_first_to_last() {
    let samples = vec![sample("daylight", t0()), sample("eclipsed", t0() + 90.0)];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, at(0));
    assert_eq!(windows[0].end, at(90));
}

#[test]
fn test_unterminated_window_closed_by_last_sample() {
    let samples = vec![sample("daylight", t0()), sample("daylight", t0() + 60.0)];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, at(0));
    assert_eq!(windows[0].end, at(60));
}

#[test]
fn test_eclipsed_only_yields_no_windows() {
    let samples = vec![sample("eclipsed", t0() + 30.0), sample("eclipsed", t0() + 90.0)];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert!(windows.is_empty());
}

#[test]
fn test_single_daylight_sample_is_degenerate_window() {
    let samples = vec![sample("daylight", t0())];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, windows[0].end);
    assert_eq!(windows[0].start, at(0));
}

#[test]
fn test_empty_input_yields_empty_output() {
    let windows = extract_daylight_windows(&[]).unwrap();
    assert!(windows.is_empty());
}

#[test]
fn test_repeated_daylight_keeps_original_start() {
    let samples = vec![
        sample("daylight", t0()),
        sample("daylight", t0() + 30.0),
        sample("eclipsed", t0() + 60.0),
    ];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, at(0));
    assert_eq!(windows[0].end, at(60));
}

#[test]
fn test_window_closes_on_first_eclipse() {
    let samples = vec![
        sample("daylight", t0()),
        sample("eclipsed", t0() + 30.0),
        sample("eclipsed", t0() + 60.0),
    ];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].end, at(30));
}

#[test]
fn test_unknown_visibility_is_ignored() {
    let samples = vec![
        sample("visible", t0()),
        sample("daylight", t0() + 30.0),
        sample("visible", t0() + 60.0),
        sample("eclipsed", t0() + 90.0),
    ];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, at(30));
    assert_eq!(windows[0].end, at(90));
}

#[test]
fn test_tail_closure_uses_last_sample_regardless_of_visibility() {
    let samples = vec![sample("daylight", t0()), sample("visible", t0() + 30.0)];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].end, at(30));
}

#[test]
fn test_windows_emitted_in_input_order() {
    let mut samples = Vec::new();
    for i in 0..3 {
        let offset = (i * 120) as f64;
        samples.push(sample("daylight", t0() + offset));
        samples.push(sample("eclipsed", t0() + offset + 60.0));
    }
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 3);
    for pair in windows.windows(2) {
        assert!(pair[0].end <= pair[1].start);
    }
}

#[test]
fn test_fractional_timestamps_preserved() {
    let samples = vec![sample("daylight", t0() + 0.25)];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows[0].start.timestamp(), base_time().timestamp());
    assert_eq!(windows[0].start.timestamp_subsec_millis(), 250);
}

#[test]
fn test_missing_visibility_is_missing_field_error() {
    let samples = vec![json!({"timestamp": t0()}).as_object().cloned().unwrap()];
    let err = extract_daylight_windows(&samples).unwrap_err();
    assert!(matches!(
        err,
        DaylightError::MissingField {
            key: "visibility",
            ..
        }
    ));
}

#[test]
fn test_missing_timestamp_is_missing_field_error() {
    let samples = vec![json!({"visibility": "daylight"}).as_object().cloned().unwrap()];
    let err = extract_daylight_windows(&samples).unwrap_err();
    assert!(matches!(
        err,
        DaylightError::MissingField {
            key: "timestamp",
            ..
        }
    ));
}

#[test]
fn test_non_numeric_timestamp_is_type_error() {
    let samples = vec![
        json!({"visibility": "daylight", "timestamp": "2024-01-01T00:00:00"})
            .as_object()
            .cloned()
            .unwrap(),
    ];
    let err = extract_daylight_windows(&samples).unwrap_err();
    assert!(matches!(err, DaylightError::InvalidType { .. }));
}

#[test]
fn test_huge_timestamp_is_range_error() {
    let samples = vec![sample("daylight", 1e13)];
    let err = extract_daylight_windows(&samples).unwrap_err();
    assert!(matches!(err, DaylightError::OutOfRange { .. }));
}

#[test]
fn test_astronomical_timestamp_is_overflow_error() {
    let samples = vec![sample("daylight", 1e24)];
    let err = extract_daylight_windows(&samples).unwrap_err();
    assert!(matches!(err, DaylightError::Overflow { .. }));
}

#[test]
fn test_negative_overflow_is_distinct_from_range() {
    let range_err = extract_daylight_windows(&[sample("daylight", -1e13)]).unwrap_err();
    assert!(matches!(range_err, DaylightError::OutOfRange { .. }));

    let overflow_err = extract_daylight_windows(&[sample("daylight", -1e24)]).unwrap_err();
    assert!(matches!(overflow_err, DaylightError::Overflow { .. }));
}

#[test]
fn test_timestamp_only_read_when_window_state_changes() {
    // An eclipsed sample with a garbage timestamp is a no-op while no
    // window is open, and a repeated daylight sample never reads its
    // timestamp at all.
    let samples = vec![
        json!({"visibility": "eclipsed", "timestamp": "garbage"})
            .as_object()
            .cloned()
            .unwrap(),
        sample("daylight", t0()),
        json!({"visibility": "daylight", "timestamp": "garbage"})
            .as_object()
            .cloned()
            .unwrap(),
        sample("eclipsed", t0() + 60.0),
    ];
    let windows = extract_daylight_windows(&samples).unwrap();
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, at(0));
    assert_eq!(windows[0].end, at(60));
}

#[test]
fn test_error_aborts_whole_call() {
    // A complete window precedes the bad sample, but nothing is returned.
    let samples = vec![
        sample("daylight", t0()),
        sample("eclipsed", t0() + 30.0),
        sample("daylight", 1e24),
    ];
    let result = extract_daylight_windows(&samples);
    assert!(result.is_err());
}

#[test]
fn test_error_message_embeds_offending_sample() {
    let samples = vec![
        json!({"visibility": "daylight", "timestamp": "bad", "sat_id": 25544})
            .as_object()
            .cloned()
            .unwrap(),
    ];
    let message = extract_daylight_windows(&samples).unwrap_err().to_string();
    assert!(message.contains("timestamp"));
    assert!(message.contains("\"bad\""));
    assert!(message.contains("25544"));
}

#[test]
fn test_window_serializes_as_iso8601() {
    let windows = extract_daylight_windows(&[sample("daylight", t0())]).unwrap();
    let rendered = serde_json::to_value(&windows[0]).unwrap();
    let start = rendered.get("start").and_then(|v| v.as_str()).unwrap();
    assert!(start.starts_with("2024-12-01T00:00:00"));
}
