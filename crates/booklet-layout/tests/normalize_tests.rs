use booklet_layout::records::{RawRecord, parse_duration, parse_time, weekday_name};
use booklet_layout::*;
use chrono::{NaiveTime, TimeDelta};
use serde_json::{Value, json};

fn record(value: Value) -> RawRecord {
    match value {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn base() -> RawRecord {
    record(json!({
        "meeting_name": "New Hope",
        "start_time": "18:00",
        "duration_time": "60",
        "weekday_tinyint": "1",
    }))
}

fn rejected_field(record: &RawRecord) -> String {
    match Meeting::from_record(record) {
        Err(e) => e.field,
        Ok(m) => panic!("Expected rejection, got {:?}", m),
    }
}

#[test]
fn test_weekday_names() {
    assert_eq!(weekday_name(1), Some("Sunday"));
    assert_eq!(weekday_name(7), Some("Saturday"));
    assert_eq!(weekday_name(0), None);
    assert_eq!(weekday_name(8), None);
}

#[test]
fn test_weekday_out_of_range() {
    for bad in [json!(0), json!(8), json!("-1"), json!("Monday")] {
        let mut rec = base();
        rec.insert("weekday_tinyint".into(), bad);
        assert_eq!(rejected_field(&rec), "weekday_tinyint");
    }
}

#[test]
fn test_missing_and_empty_required_fields() {
    for key in ["meeting_name", "start_time", "duration_time", "weekday_tinyint"] {
        let mut rec = base();
        rec.remove(key);
        assert_eq!(rejected_field(&rec), key);

        let mut rec = base();
        rec.insert(key.into(), json!("  "));
        assert_eq!(rejected_field(&rec), key);
    }
}

#[test]
fn test_malformed_times() {
    for bad in ["7pm", "25:00", "12:75", "1440", "1:2:3:4"] {
        let mut rec = base();
        rec.insert("start_time".into(), json!(bad));
        assert_eq!(rejected_field(&rec), "start_time", "{}", bad);
    }
}

#[test]
fn test_time_forms() {
    assert_eq!(parse_time("7:05"), NaiveTime::from_hms_opt(7, 5, 0));
    assert_eq!(parse_time("19:30:00"), NaiveTime::from_hms_opt(19, 30, 0));
    assert_eq!(parse_time("45"), NaiveTime::from_hms_opt(0, 45, 0));
    assert_eq!(parse_time("0"), NaiveTime::from_hms_opt(0, 0, 0));
    assert_eq!(parse_time("1439"), NaiveTime::from_hms_opt(23, 59, 0));
}

#[test]
fn test_duration_forms() {
    assert_eq!(parse_duration("1:30"), Some(TimeDelta::minutes(90)));
    assert_eq!(parse_duration("90"), Some(TimeDelta::minutes(90)));
    assert_eq!(parse_duration("02:00:00"), Some(TimeDelta::hours(2)));
    assert_eq!(parse_duration("an hour"), None);
}

#[test]
fn test_bad_format_id_list() {
    let mut rec = base();
    rec.insert("format_shared_id_list".into(), json!("4,x"));
    assert_eq!(rejected_field(&rec), "format_shared_id_list");
}

#[test]
fn test_format_requires_key_and_name() {
    let ok = record(json!({ "id": 1, "key_string": "O", "name_string": "Open" }));
    assert!(Format::from_record(&ok).is_ok());

    let no_name = record(json!({ "id": 1, "key_string": "O", "name_string": "" }));
    assert_eq!(Format::from_record(&no_name).unwrap_err().field, "name_string");

    let bad_id = record(json!({ "id": "one", "key_string": "O", "name_string": "Open" }));
    assert_eq!(Format::from_record(&bad_id).unwrap_err().field, "id");
}

#[test]
fn test_normalize_reports_validation_error() {
    let mut bad = base();
    bad.insert("weekday_tinyint".into(), json!(9));
    let result = normalize_meetings(&[base(), bad]);
    match result {
        Err(BookletError::Validation(e)) => {
            assert_eq!(e.field, "weekday_tinyint");
            assert!(e.to_string().starts_with("weekday_tinyint:"));
        }
        other => panic!("Expected Validation error, got {:?}", other),
    }
}
