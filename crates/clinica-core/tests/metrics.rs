use chrono::{NaiveDate, NaiveDateTime};
use clinica_core::metrics::{
    attention_end, consultation_minutes, minutes_between, round2, wait_minutes,
};
use clinica_core::ReportError;

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

#[test]
fn wait_is_consultation_minus_admission() {
    assert_eq!(wait_minutes(Some(at(8, 0, 0)), Some(at(8, 45, 30))), Some(45.5));
    assert_eq!(wait_minutes(Some(at(8, 0, 0)), None), None);
    assert_eq!(wait_minutes(None, Some(at(8, 0, 0))), None);
    assert_eq!(minutes_between(at(9, 0, 0), at(8, 30, 0)), -30.0);
}

#[test]
fn consultation_duration_runs_to_last_note() {
    assert_eq!(
        consultation_minutes(Some(at(9, 0, 0)), Some(at(9, 12, 0))),
        Some(12.0)
    );
    assert_eq!(consultation_minutes(Some(at(9, 0, 0)), None), None);
}

#[test]
fn missing_end_defaults_to_start_plus_default_minutes() {
    assert_eq!(attention_end(at(9, 0, 0), None, 20).unwrap(), at(9, 20, 0));
    assert_eq!(
        attention_end(at(9, 0, 0), Some(at(9, 5, 0)), 20).unwrap(),
        at(9, 5, 0)
    );
}

#[test]
fn out_of_range_default_end_is_rejected() {
    assert!(matches!(
        attention_end(at(9, 0, 0), None, i64::MAX),
        Err(ReportError::Config(_))
    ));
    assert!(matches!(
        attention_end(at(9, 0, 0), None, 1_000_000_000_000_000),
        Err(ReportError::Config(_))
    ));
    // a closing note makes the default irrelevant
    assert!(attention_end(at(9, 0, 0), Some(at(9, 5, 0)), i64::MAX).is_ok());
}

#[test]
fn round2_keeps_two_decimals() {
    assert_eq!(round2(10.0 / 3.0), 3.33);
    assert_eq!(round2(45.5), 45.5);
}
